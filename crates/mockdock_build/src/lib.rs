//! Dockerfile reader for the simulated `build` command.
//!
//! Lines are split into an upper-cased instruction keyword and its raw
//! argument text. Nothing is executed and arguments are not interpreted,
//! apart from picking the image name out of `FROM`.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DOCKERFILE: &str = "Dockerfile";

/// One logical Dockerfile line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileCommand {
    pub instruction: String,
    pub arguments: String,
}

impl DockerfileCommand {
    /// The image named by a `FROM` line, skipping `--platform=...` style
    /// flags and any `AS stage` suffix.
    pub fn base_image(&self) -> Option<&str> {
        if self.instruction != "FROM" {
            return None;
        }
        self.arguments
            .split_whitespace()
            .find(|token| !token.starts_with("--"))
    }

    /// The `AS <name>` stage name of a `FROM` line.
    pub fn stage_name(&self) -> Option<&str> {
        if self.instruction != "FROM" {
            return None;
        }
        let mut tokens = self
            .arguments
            .split_whitespace()
            .skip_while(|token| token.starts_with("--"))
            .skip(1);
        match (tokens.next(), tokens.next()) {
            (Some(keyword), Some(name)) if keyword.eq_ignore_ascii_case("AS") => Some(name),
            _ => None,
        }
    }
}

/// Parse Dockerfile text into commands.
///
/// Blank lines and `#` comments are skipped. A trailing `\` joins the line
/// with the next one, separated by a single space.
pub fn parse_dockerfile(content: &str) -> Vec<DockerfileCommand> {
    let mut commands = Vec::new();
    let mut pending = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head);
            pending.push(' ');
            continue;
        }

        let full = if pending.is_empty() {
            line.to_string()
        } else {
            let mut joined = std::mem::take(&mut pending);
            joined.push_str(line);
            joined
        };
        commands.push(split_command(&full));
    }

    // a dangling continuation at EOF still counts as a command
    if !pending.trim().is_empty() {
        commands.push(split_command(pending.trim_end()));
    }

    commands
}

fn split_command(line: &str) -> DockerfileCommand {
    let (keyword, rest) = line.split_once(' ').unwrap_or((line, ""));
    DockerfileCommand {
        instruction: keyword.to_uppercase(),
        arguments: rest.to_string(),
    }
}

/// Build context: directory containing the Dockerfile and referenced files.
#[derive(Debug)]
pub struct BuildContext {
    pub context_dir: PathBuf,
    pub commands: Vec<DockerfileCommand>,
}

impl BuildContext {
    /// Validates `context_dir` and reads its `Dockerfile`.
    pub fn open(context_dir: impl Into<PathBuf>) -> Result<Self> {
        let context_dir = context_dir.into();
        if !context_dir.is_dir() {
            bail!("build context path '{}' does not exist", context_dir.display());
        }

        let dockerfile = context_dir.join(DOCKERFILE);
        if !dockerfile.is_file() {
            bail!("Dockerfile not found in '{}'", context_dir.display());
        }

        let commands = read_dockerfile(&dockerfile)?;
        debug!(path = %dockerfile.display(), commands = commands.len(), "Dockerfile parsed");
        Ok(Self {
            context_dir,
            commands,
        })
    }

    /// Every external image referenced by a `FROM` line, in order. A `FROM`
    /// naming an earlier `AS` stage (case-insensitively) is skipped.
    pub fn base_images(&self) -> Vec<&str> {
        let mut stages: Vec<&str> = Vec::new();
        let mut images = Vec::new();
        for command in &self.commands {
            let Some(image) = command.base_image() else {
                continue;
            };
            if !stages.iter().any(|stage| stage.eq_ignore_ascii_case(image)) {
                images.push(image);
            }
            if let Some(stage) = command.stage_name() {
                stages.push(stage);
            }
        }
        images
    }
}

pub fn read_dockerfile(path: &Path) -> Result<Vec<DockerfileCommand>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to open Dockerfile {}", path.display()))?;
    Ok(parse_dockerfile(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmd(instruction: &str, arguments: &str) -> DockerfileCommand {
        DockerfileCommand {
            instruction: instruction.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[test]
    fn splits_keyword_from_arguments() {
        let parsed = parse_dockerfile("from alpine:3.19\nRUN apk add --no-cache curl\nCMD [\"sh\"]\n");
        assert_eq!(
            parsed,
            vec![
                cmd("FROM", "alpine:3.19"),
                cmd("RUN", "apk add --no-cache curl"),
                cmd("CMD", "[\"sh\"]"),
            ]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let parsed = parse_dockerfile("# syntax\n\n   \nFROM scratch\n  # indented comment\n");
        assert_eq!(parsed, vec![cmd("FROM", "scratch")]);
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "RUN apt-get update && \\\n    apt-get install -y git \\\n    curl\nEXPOSE 80";
        let parsed = parse_dockerfile(text);
        assert_eq!(
            parsed,
            vec![
                cmd("RUN", "apt-get update &&  apt-get install -y git  curl"),
                cmd("EXPOSE", "80"),
            ]
        );
    }

    #[test]
    fn instruction_without_arguments() {
        assert_eq!(parse_dockerfile("HEALTHCHECK"), vec![cmd("HEALTHCHECK", "")]);
    }

    #[test]
    fn dangling_continuation_is_kept() {
        assert_eq!(parse_dockerfile("RUN echo hi \\"), vec![cmd("RUN", "echo hi")]);
    }

    #[test]
    fn base_image_skips_flags_and_stage_names() {
        assert_eq!(cmd("FROM", "--platform=linux/amd64 golang:1.22 AS build").base_image(), Some("golang:1.22"));
        assert_eq!(cmd("FROM", "alpine").base_image(), Some("alpine"));
        assert_eq!(cmd("RUN", "alpine").base_image(), None);
    }

    #[test]
    fn stage_name_follows_as() {
        assert_eq!(cmd("FROM", "golang:1.22 AS build").stage_name(), Some("build"));
        assert_eq!(cmd("FROM", "--platform=$BUILDPLATFORM node:20 as deps").stage_name(), Some("deps"));
        assert_eq!(cmd("FROM", "alpine").stage_name(), None);
        assert_eq!(cmd("RUN", "x AS y").stage_name(), None);
    }

    #[test]
    fn earlier_stages_are_not_base_images() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(DOCKERFILE),
            "FROM rust:1.79 AS Build\nRUN cargo build\nFROM build AS test\nFROM alpine:3.19\nFROM test\n",
        )
        .unwrap();

        let ctx = BuildContext::open(tmp.path()).unwrap();
        assert_eq!(ctx.base_images(), vec!["rust:1.79", "alpine:3.19"]);
    }

    #[test]
    fn context_requires_a_dockerfile() {
        let tmp = TempDir::new().unwrap();
        let err = BuildContext::open(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Dockerfile not found"));

        let err = BuildContext::open(tmp.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn context_collects_base_images() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(DOCKERFILE),
            "FROM golang:1.22 AS build\nRUN go build\nFROM alpine:3.19\nCOPY --from=build /app /app\n",
        )
        .unwrap();

        let ctx = BuildContext::open(tmp.path()).unwrap();
        assert_eq!(ctx.commands.len(), 4);
        assert_eq!(ctx.base_images(), vec!["golang:1.22", "alpine:3.19"]);
    }
}
