use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata read from an optional leading YAML block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParsedMarkdown {
    pub frontmatter: FrontMatter,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter must have opening and closing ---")]
    Unclosed,

    #[error("front matter yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn split_frontmatter(input: &str) -> Result<ParsedMarkdown, FrontMatterError> {
    let normalized = input.trim_start_matches('\u{feff}');
    let mut lines = normalized.lines();

    if lines.next().map(str::trim_end) != Some("---") {
        return Ok(ParsedMarkdown {
            frontmatter: FrontMatter::default(),
            body: normalized.to_string(),
        });
    }

    let mut block = String::new();
    let mut found_end = false;
    let mut remaining: Vec<&str> = Vec::new();

    for line in lines {
        if found_end {
            remaining.push(line);
        } else if line.trim_end() == "---" {
            found_end = true;
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }

    if !found_end {
        return Err(FrontMatterError::Unclosed);
    }

    let frontmatter = if block.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(&block)?
    };

    Ok(ParsedMarkdown {
        frontmatter,
        body: remaining.join("\n"),
    })
}
