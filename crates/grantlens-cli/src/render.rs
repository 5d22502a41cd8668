//! Output rendering for reconciled grants.
//!
//! YAML is the default: alias, then grant name, then one leaf per logical
//! grant with operations written as a flow sequence. A missing retiring
//! principal is left out rather than written as null.

use std::fmt::Write as _;

use grantlens_core::{AliasReconciliation, LogicalGrant};

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render reconciled grants in the requested format. Always ends in a newline.
pub fn render(output: &AliasReconciliation, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Yaml => render_yaml(output)?,
        OutputFormat::Json => render_json(output)?,
    })
}

/// Render as pretty-printed JSON.
pub fn render_json(output: &AliasReconciliation) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(output)?;
    json.push('\n');
    Ok(json)
}

/// Render as YAML with flow-style operation lists.
pub fn render_yaml(output: &AliasReconciliation) -> Result<String, serde_yaml::Error> {
    if output.is_empty() {
        return Ok("{}\n".to_string());
    }

    let mut out = String::new();
    for (alias, grants) in output {
        if grants.is_empty() {
            line(&mut out, 0, &format!("{}: {{}}", scalar(alias)?));
            continue;
        }
        line(&mut out, 0, &format!("{}:", scalar(alias)?));
        for (name, grant) in grants {
            line(&mut out, 1, &format!("{}:", scalar(name)?));
            render_grant(&mut out, grant)?;
        }
    }
    Ok(out)
}

fn render_grant(out: &mut String, grant: &LogicalGrant) -> Result<(), serde_yaml::Error> {
    line(
        out,
        2,
        &format!("grantee_principal: {}", scalar(&grant.grantee_principal)?),
    );
    if let Some(retiring) = &grant.retiring_principal {
        line(out, 2, &format!("retiring_principal: {}", scalar(retiring)?));
    }

    let operations = grant
        .operations
        .iter()
        .map(|op| flow_item(op))
        .collect::<Result<Vec<_>, _>>()?;
    line(out, 2, &format!("operations: [{}]", operations.join(", ")));

    line(out, 2, "grant_ids:");
    for (region, id) in &grant.grant_ids {
        line(out, 3, &format!("{}: {}", scalar(region)?, scalar(id)?));
    }
    Ok(())
}

fn line(out: &mut String, depth: usize, text: &str) {
    let _ = writeln!(out, "{:indent$}{}", "", text, indent = depth * 2);
}

/// A string as a single-line YAML scalar, quoted only where YAML needs it.
fn scalar(value: &str) -> Result<String, serde_yaml::Error> {
    if value.contains('\n') {
        // JSON strings are valid double-quoted YAML scalars
        return Ok(serde_json::to_string(value).unwrap_or_default());
    }
    Ok(serde_yaml::to_string(value)?.trim_end_matches('\n').to_string())
}

/// A scalar that is safe inside a flow sequence.
fn flow_item(value: &str) -> Result<String, serde_yaml::Error> {
    let item = scalar(value)?;
    if item.contains([',', '[', ']', '{', '}']) && !item.starts_with(['"', '\'']) {
        return Ok(serde_json::to_string(value).unwrap_or_default());
    }
    Ok(item)
}
