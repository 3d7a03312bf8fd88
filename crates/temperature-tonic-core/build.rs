/// Builds the gRPC client and server code for `temperature.proto` using
/// `tonic-prost-build`.
///
/// Alongside the generated bindings, an encoded `FileDescriptorSet` is written
/// to `OUT_DIR/temperature_descriptor.bin` so the server can expose the schema
/// over gRPC reflection.
///
/// # Files and Paths
///
/// - Proto file: `proto/temperature.proto`
/// - Includes: `proto/`
///
/// # Panics
///
/// Panics if code generation fails; cargo surfaces the message as a build
/// error.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("temperature_descriptor.bin");

    println!("cargo:rerun-if-changed=proto/temperature.proto");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/temperature.proto"], &["proto"])
        .unwrap();
}
