use std::process::Command;

fn main() {
    let build_date = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=BUILD_DATE={build_date}");

    let commit = git(&["rev-parse", "--short", "HEAD"]);
    println!("cargo:rustc-env=BUILD_COMMIT={commit}");

    let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]);
    println!("cargo:rustc-env=BUILD_BRANCH={branch}");

    // Read through option_env! for the `pr` version label.
    println!("cargo:rerun-if-env-changed=PR_NUMBER");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}
