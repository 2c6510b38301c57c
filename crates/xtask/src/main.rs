use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Crates each layer must not depend on, directly or by path.
const LAYER_RULES: &[(&str, &[&str])] = &[
    (
        "tavernkeep-domain",
        &[
            "sqlx",
            "tokio",
            "dioxus",
            "dioxus-desktop",
            "argon2",
            "rand",
            "tavernkeep-engine",
            "tavernkeep-player",
        ],
    ),
    (
        "tavernkeep-engine",
        &["dioxus", "dioxus-desktop", "tavernkeep-player"],
    ),
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
    manifest_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    #[serde(default)]
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = dependency_violations(&metadata.packages);
    for package in &metadata.packages {
        let Some(forbidden) = forbidden_for(&package.name) else {
            continue;
        };
        let src = package
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .unwrap_or_else(|| metadata.workspace_root.join("src"));
        for (file, line) in source_violations(&src, forbidden)? {
            violations.push(format!(
                "{}: {} uses a forbidden crate: {}",
                package.name,
                file.display(),
                line.trim()
            ));
        }
    }

    if violations.is_empty() {
        println!("arch-check: OK ({} packages)", metadata.packages.len());
        return Ok(());
    }

    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("arch-check failed with {} violation(s)", violations.len())
}

fn forbidden_for(package: &str) -> Option<&'static [&'static str]> {
    LAYER_RULES
        .iter()
        .find(|(name, _)| *name == package)
        .map(|(_, forbidden)| *forbidden)
}

/// Normal (non-dev) dependencies that break the layering.
fn dependency_violations(packages: &[Package]) -> Vec<String> {
    let mut violations = Vec::new();
    for package in packages {
        let Some(forbidden) = forbidden_for(&package.name) else {
            continue;
        };
        for dep in &package.dependencies {
            let is_dev = dep.kind.as_deref() == Some("dev");
            if !is_dev && forbidden.contains(&dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
        }
    }
    violations
}

/// Lines under `src` that reference a forbidden crate by path.
fn source_violations(src: &Path, forbidden: &[&str]) -> anyhow::Result<Vec<(PathBuf, String)>> {
    let crates: Vec<String> = forbidden.iter().map(|c| c.replace('-', "_")).collect();
    let pattern = format!(r"\b({})::", crates.join("|"));
    let re = regex_lite::Regex::new(&pattern).context("building crate path pattern")?;

    let mut files = BTreeMap::new();
    collect_rust_files(src, &mut files)?;

    let mut hits = Vec::new();
    for (path, contents) in files {
        for line in contents.lines() {
            let code = line.split("//").next().unwrap_or_default();
            if re.is_match(code) {
                hits.push((path.clone(), line.to_string()));
            }
        }
    }
    Ok(hits)
}

fn collect_rust_files(dir: &Path, out: &mut BTreeMap<PathBuf, String>) -> anyhow::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rust_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            out.insert(path, contents);
        }
    }
    Ok(())
}
