//! Print the OpenAPI document as YAML.

use bookshelf::ApiDoc;
use utoipa::OpenApi;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let yaml = ApiDoc::openapi().to_yaml()?;
    std::io::Write::write_all(&mut std::io::stdout(), yaml.as_bytes())?;
    Ok(())
}
