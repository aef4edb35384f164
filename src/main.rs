#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use log::info;
use poem::endpoint::StaticFilesEndpoint;
use poem::{get, listener::TcpListener, Endpoint, EndpointExt, Route};

// Trails Utilities
use crate::trails::handler::trails_handler;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod trails;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "TrailsServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting trails_server!");

    // Configure our log.
    init_log()?;

    // Read the parameters and compile the templates.  Either failing
    // aborts startup.
    let ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", ctx.parms)));

    // Log build info.
    print_version_info();

    // --------------- Main Loop Set Up ---------------
    let addr = format!("0.0.0.0:{}", ctx.parms.config.http_port);
    let app = build_app(Arc::new(ctx));

    // ------------------ Main Loop -------------------
    info!("Listening on http://{}", addr);
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await?;
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Assemble the routes.  The runtime context is attached as request data so
 * handlers receive it explicitly.
 */
fn build_app(ctx: Arc<RuntimeCtx>) -> impl Endpoint {
    let static_files = StaticFilesEndpoint::new(&ctx.parms.config.static_dir);
    Route::new()
        .at("/trails", get(trails_handler).post(trails_handler))
        .nest("/static", static_files)
        .data(ctx)
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("{}.", format!("\n*** Running TRAILS={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
