//! Subcommand implementations

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use twin_contract::{build_prompt, ResponseValidator};
use twin_core::{SimulationOrchestrator, TwinConfig};
use twin_gemini::GeminiClient;
use twin_layout::LayoutEngine;
use twin_model::StrategicArtifact;

/// Simulation inputs shared by `simulate` and `prompt`
#[derive(Debug, Clone, Default)]
pub(crate) struct Request {
    pub(crate) company: String,
    pub(crate) context: String,
    pub(crate) options: String,
}

/// Defaults when no file is given
pub(crate) fn load_config(path: Option<&Path>) -> Result<TwinConfig> {
    match path {
        Some(path) => TwinConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(TwinConfig::default()),
    }
}

/// Read a captured response; `-` is stdin
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading response from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub(crate) fn prompt(request: &Request) -> String {
    build_prompt(&request.company, &request.context, &request.options)
}

pub(crate) async fn simulate(request: &Request, config: &TwinConfig) -> Result<Value> {
    let model = GeminiClient::from_env(config.model.clone())
        .context("creating model client")?;
    let orchestrator = SimulationOrchestrator::with_config(Arc::new(model), config)?;
    let simulation = orchestrator
        .simulate(&request.company, &request.context, &request.options)
        .await
        .with_context(|| format!("simulating {}", request.company))?;
    Ok(serde_json::to_value(&simulation)?)
}

pub(crate) fn validate(raw: &str, config: &TwinConfig) -> Result<StrategicArtifact> {
    ResponseValidator::with_limits(config.validation)
        .validate(raw)
        .map_err(|e| {
            let kind = e.kind();
            anyhow::Error::new(e).context(format!("response rejected ({kind})"))
        })
}

pub(crate) fn layout(raw: &str, config: &TwinConfig) -> Result<Value> {
    let artifact = validate(raw, config)?;
    let engine = LayoutEngine::new(config.layout)?;
    let positioned = engine
        .layout(&artifact.flow_graph)
        .context("laying out flow graph")?;
    Ok(json!({
        "flowGraph": artifact.flow_graph,
        "positioned": positioned,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use twin_test_utils::{artifact_document, artifact_json};

    #[test]
    fn prompt_names_company() {
        let request = Request {
            company: "Acme".into(),
            context: "flat growth".into(),
            options: "cut prices".into(),
        };
        let text = prompt(&request);
        assert!(text.contains("Acme"));
        assert!(text.contains("cut prices"));
    }

    #[test]
    fn validate_reports_kind() {
        let err = validate("not json", &TwinConfig::default()).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn layout_emits_positions() {
        let value = layout(&artifact_json(), &TwinConfig::default()).unwrap();
        assert_eq!(value["positioned"]["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(value["flowGraph"]["edges"][0]["sourceId"], json!("1"));
    }

    #[test]
    fn reads_captured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", artifact_document()).unwrap();
        let raw = read_input(file.path()).unwrap();
        assert!(validate(&raw, &TwinConfig::default()).is_ok());
    }

    #[test]
    fn missing_config_file_fails_with_path() {
        let err = load_config(Some(Path::new("/nonexistent/twin.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/twin.toml"));
    }
}
