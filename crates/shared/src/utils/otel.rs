use opentelemetry::{Context, global};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tokio::time::Instant;

/// Span context plus the wall clock start of one service operation.
pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

pub struct Telemetry {
    service_name: String,
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    /// Installs a global tracer provider exporting spans to stdout. Without
    /// it the global tracer is a no-op.
    pub fn init_tracer(&self) -> SdkTracerProvider {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let provider = SdkTracerProvider::builder()
            .with_resource(self.resource())
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();

        global::set_tracer_provider(provider.clone());
        provider
    }
}
