use core::{fmt, hint::black_box};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::time::Instant;
use temperature_tonic_core::proto::{
    CelsiusRequest, FahrenheitRequest, temperature_converter_client::TemperatureConverterClient,
};
use temperature_tonic_server::server::{config::ServerConfig, serve::serve_with_incoming};
use tokio::{net::TcpListener, runtime::Builder, sync::oneshot, task::JoinSet};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{codec::CompressionEncoding, transport::Channel};

#[derive(Clone, Copy, Debug)]
enum Compression {
    None,
    Gzip,
    Zstd,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

impl From<Compression> for Option<CompressionEncoding> {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => None,
            Compression::Gzip => Some(CompressionEncoding::Gzip),
            Compression::Zstd => Some(CompressionEncoding::Zstd),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct GrpcBenchParams {
    concurrency: usize,
    compression: Compression,
}

fn grpc_bench(c: &mut Criterion) {
    let rt = Builder::new_multi_thread().enable_all().build().unwrap();

    // The server runs on the same runtime as the clients, on an ephemeral
    // port, and is stopped once every case has run.
    let (addr, stop) = rt.block_on(async {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("missing local addr");
        let (stop, rx) = oneshot::channel::<()>();
        tokio::spawn(serve_with_incoming(
            TcpListenerStream::new(listener),
            ServerConfig::default(),
            async {
                let _ = rx.await;
            },
        ));
        (addr, stop)
    });

    let concurrency_cases = [1, 8, 64, 256];
    let compression_cases = [Compression::None, Compression::Gzip, Compression::Zstd];

    let mut cases = Vec::new();
    for &concurrency in &concurrency_cases {
        for &compression in &compression_cases {
            cases.push(GrpcBenchParams {
                concurrency,
                compression,
            });
        }
    }

    for params in &cases {
        let mut group = c.benchmark_group("grpc/convert");
        // One F->C and one C->F call per virtual client.
        group.throughput(Throughput::Elements(2 * params.concurrency as u64));

        group.bench_function(
            format!("conc/{}/comp/{}", params.concurrency, params.compression),
            |b| {
                b.to_async(&rt).iter_custom(|iters| async move {
                    let channel = Channel::from_shared(format!("http://{addr}"))
                        .expect("invalid uri")
                        .connect()
                        .await
                        .expect("Failed to connect to server");

                    let start = Instant::now();

                    for _ in 0..iters {
                        run_grpc_convert_bench(&channel, params).await;
                    }

                    start.elapsed()
                });
            },
        );

        group.finish();
    }

    let _ = stop.send(());
}

async fn run_grpc_convert_bench(channel: &Channel, params: &GrpcBenchParams) {
    let mut tasks = JoinSet::new();

    for i in 0..params.concurrency {
        let mut client = TemperatureConverterClient::new(channel.clone());
        if let Some(encoding) = params.compression.into() {
            client = client.accept_compressed(encoding).send_compressed(encoding);
        }

        tasks.spawn(async move {
            // Same input ranges the load harness uses: -40..160°F, -40..60°C.
            let fahrenheit = -40.0 + (i % 200) as f64;
            let celsius = -40.0 + (i % 100) as f64;

            let resp = client
                .fahrenheit_to_celsius(FahrenheitRequest { fahrenheit })
                .await
                .expect("FahrenheitToCelsius failed");
            black_box(resp.into_inner().celsius);

            let resp = client
                .celsius_to_fahrenheit(CelsiusRequest { celsius })
                .await
                .expect("CelsiusToFahrenheit failed");
            black_box(resp.into_inner().fahrenheit);
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}

criterion_group!(grpc_benches, grpc_bench);
criterion_main!(grpc_benches);
