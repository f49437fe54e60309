//! QR/Barcode Service - renders QR codes and Code128 barcodes as PNG.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qr_barcode_service::{
    codegen::CodeGenerator,
    config::Config,
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.debug);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    print_banner();

    let layout = config.layout();

    info!("Configuration:");
    info!("  Rate limit: {}", config.rate_limit);
    info!("  Generate rate limit: {}", config.generate_rate_limit);
    info!(
        "  Barcode: module {}x{}mm, quiet zone {}mm, font {}pt, text distance {}mm, top margin {}mm",
        layout.module_width,
        layout.module_height,
        layout.quiet_zone,
        layout.font_size,
        layout.text_distance,
        layout.margin_top
    );
    info!(
        "  API docs host: {} ({})",
        config.swagger_host(),
        config.swagger_schemes().join(", ")
    );

    let generator = CodeGenerator::new(layout);
    let router = create_router(generator, RouterConfig::from_config(&config));

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl -o code.png 'http://{}/generate?content=Hello'", addr);
    info!(
        "    curl -o barcode.png 'http://{}/generate?content=ABC-123&type=barcode'",
        addr
    );
    info!("");
    info!("  API documentation:");
    info!("    open http://{}/docs", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    // Peer addresses key the rate limiters
    let service = router.into_make_service_with_connect_info::<SocketAddr>();

    if let Err(e) = axum::serve(listener, service).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Print the startup banner.
fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    info!("");
    info!(" ██████╗ ██████╗     ██╗██████╗  █████╗ ██████╗  ██████╗ ██████╗ ██████╗ ███████╗");
    info!("██╔═══██╗██╔══██╗   ██╔╝██╔══██╗██╔══██╗██╔══██╗██╔════╝██╔═══██╗██╔══██╗██╔════╝");
    info!("██║   ██║██████╔╝  ██╔╝ ██████╔╝███████║██████╔╝██║     ██║   ██║██║  ██║█████╗  ");
    info!("██║▄▄ ██║██╔══██╗ ██╔╝  ██╔══██╗██╔══██║██╔══██╗██║     ██║   ██║██║  ██║██╔══╝  ");
    info!("╚██████╔╝██║  ██║██╔╝   ██████╔╝██║  ██║██║  ██║╚██████╗╚██████╔╝██████╔╝███████╗");
    info!(" ╚══▀▀═╝ ╚═╝  ╚═╝╚═╝    ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝ ╚═════╝ ╚═════╝ ╚══════╝");
    info!("");
    info!("                                    v{}", version);
}

/// Initialize the tracing/logging subsystem.
fn init_logging(debug: bool) {
    let env_filter = if debug {
        "qr_barcode_service=debug,tower_http=debug"
    } else {
        "qr_barcode_service=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
