use chrono::Utc;
use std::{env, fs, process::Command};

/// Stamped variables, in the order they are resolved.
const STAMPS: [&str; 8] = [
    "BUILD_IDENTITY_ID",
    "BUILD_IDENTITY_BRANCH",
    "BUILD_IDENTITY_TAG",
    "BUILD_IDENTITY_DATE",
    "BUILD_IDENTITY_AUTHOR",
    "BUILD_IDENTITY_COMMITTER",
    "BUILD_IDENTITY_BUILDER",
    "BUILD_IDENTITY_STATUS",
];

fn main() {
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=.git/refs/tags");
    for name in STAMPS {
        println!("cargo:rerun-if-env-changed={}", name);
    }

    set_build_metadata();
}

fn set_build_metadata() {
    let identifier = stamp_override("BUILD_IDENTITY_ID")
        .or_else(|| {
            fs::read_to_string("VERSION")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .or_else(|| git(&["describe", "--tags", "--always", "--dirty"]))
        .unwrap_or_else(|| env::var("CARGO_PKG_VERSION").unwrap_or_default());

    let branch = stamp_override("BUILD_IDENTITY_BRANCH")
        .or_else(|| git(&["rev-parse", "--abbrev-ref", "HEAD"]))
        .unwrap_or_default();

    let tag = stamp_override("BUILD_IDENTITY_TAG")
        .or_else(|| git(&["describe", "--exact-match", "--tags", "HEAD"]))
        .unwrap_or_else(|| "None".to_string());

    let build_date = stamp_override("BUILD_IDENTITY_DATE")
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d %H:%M:%S +0000").to_string());

    let author = stamp_override("BUILD_IDENTITY_AUTHOR")
        .or_else(|| git(&["log", "-1", "--pretty=format:%an <%ae>"]))
        .unwrap_or_default();

    let committer = stamp_override("BUILD_IDENTITY_COMMITTER")
        .or_else(|| git(&["log", "-1", "--pretty=format:%cn <%ce>"]))
        .unwrap_or_default();

    let builder = stamp_override("BUILD_IDENTITY_BUILDER")
        .or_else(git_builder)
        .unwrap_or_default();

    let status = stamp_override("BUILD_IDENTITY_STATUS")
        .or_else(git_status)
        .unwrap_or_default();

    let values = [
        identifier, branch, tag, build_date, author, committer, builder, status,
    ];
    for (name, value) in STAMPS.iter().zip(values.iter()) {
        println!("cargo:rustc-env={}={}", name, value);
    }
}

fn stamp_override(name: &str) -> Option<String> {
    env::var(name).ok().map(|s| s.trim().to_string())
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn git_builder() -> Option<String> {
    let name = git(&["config", "user.name"])?;
    match git(&["config", "user.email"]) {
        Some(email) => Some(format!("{} <{}>", name, email)),
        None => Some(name),
    }
}

fn git_status() -> Option<String> {
    // `git status` exits non-zero outside a work tree
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    if output.stdout.iter().all(u8::is_ascii_whitespace) {
        Some("CLEAN: All modifications committed".to_string())
    } else {
        Some("UNCLEAN: Modified working tree".to_string())
    }
}
