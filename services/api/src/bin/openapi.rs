//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3.0 document for the study planner: the `POST /tests`
//! and `POST /plan` form endpoints, the `GET /api/state` read model and
//! `GET /health`. The output path defaults to `openapi.json` and can be given
//! as the first argument.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let doc = ApiDoc::openapi();
    let documented_paths = doc.paths.paths.len();

    std::fs::write(&path, doc.to_pretty_json()?)?;
    println!("Wrote {} documented paths to {}", documented_paths, path);
    Ok(())
}
