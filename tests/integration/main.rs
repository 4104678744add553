//! Integration tests for repocat

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Isolated environment: a config file whose cache lives in the temp dir
    struct Env {
        temp: TempDir,
    }

    impl Env {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let cache_dir = temp.path().join("cache");
            let config = format!(
                "[cache]\ndir = {:?}\n",
                cache_dir.to_string_lossy().into_owned()
            );
            fs::write(temp.path().join("config.toml"), config).unwrap();
            Self { temp }
        }

        fn path(&self) -> &Path {
            self.temp.path()
        }

        fn repocat(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("repocat");
            cmd.env("REPOCAT_CONFIG", self.path().join("config.toml"))
                .env_remove("RUST_LOG")
                .env_remove("CI");
            cmd
        }

        /// Create a source tree under `repo/` and return its path
        fn repo(&self, files: &[(&str, &[u8])]) -> std::path::PathBuf {
            let root = self.path().join("repo");
            for (rel, content) in files {
                let path = root.join(rel);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            root
        }
    }

    fn mixed_repo(env: &Env) -> std::path::PathBuf {
        env.repo(&[
            ("a.go", b"package main\n"),
            ("b.txt", b"notes"),
            (".git/config", b"[core]\n"),
            ("img.png", b"\x89PNG\x00\x01"),
        ])
    }

    #[test]
    fn help_displays() {
        Env::new()
            .repocat()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("concatenate a repository"));
    }

    #[test]
    fn version_displays() {
        Env::new()
            .repocat()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("repocat"));
    }

    #[test]
    fn scan_applies_default_exclusions_and_binary_detection() {
        let env = Env::new();
        let repo = mixed_repo(&env);

        env.repocat()
            .args(["scan", "--format", "plain", "--path"])
            .arg(&repo)
            .assert()
            .success()
            .stdout("a.go\nb.txt\n");
    }

    #[test]
    fn scan_with_path_inclusion() {
        let env = Env::new();
        let repo = env.repo(&[
            ("src/a.go", b"package a\n"),
            ("lib/b.go", b"package b\n"),
            ("main.go", b"package main\n"),
        ]);

        env.repocat()
            .args(["scan", "--format", "plain", "-i", "/src", "--path"])
            .arg(&repo)
            .assert()
            .success()
            .stdout("src/a.go\n");
    }

    #[test]
    fn scan_json_lists_exclusion_reasons() {
        let env = Env::new();
        let repo = mixed_repo(&env);

        env.repocat()
            .args(["scan", "--format", "json", "--excluded", "--path"])
            .arg(&repo)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"path\": \"a.go\""))
            .stdout(predicate::str::contains("\"reason\": \"binary\""));
    }

    #[test]
    fn scan_rejects_invalid_pattern() {
        let env = Env::new();
        let repo = mixed_repo(&env);

        env.repocat()
            .args(["scan", "-i", "(", "--path"])
            .arg(&repo)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid inclusion pattern"));
    }

    #[test]
    fn concat_writes_document() {
        let env = Env::new();
        let repo = mixed_repo(&env);
        let out = env.path().join("out");

        env.repocat()
            .args(["concat", "--path"])
            .arg(&repo)
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Files concatenated to:"))
            .stdout(predicate::str::contains("Estimated tokens"));

        let written: Vec<_> = fs::read_dir(out.join("repo-concat-output"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);

        let name = written[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("repo-concat-"), "{name}");
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&written[0]).unwrap();
        assert!(content.starts_with("# Repository Concatenation\n"));
        assert!(content.contains("# Total files: 2\n"));
        assert!(content.contains("# File: a.go\n```\npackage main\n```\n"));
        assert!(content.contains("# File: b.txt\n```\nnotes\n```\n"));
        assert!(!content.contains("img.png"));
    }

    #[test]
    fn concat_without_token_estimate() {
        let env = Env::new();
        let repo = mixed_repo(&env);

        env.repocat()
            .args(["concat", "--no-tokens", "--path"])
            .arg(&repo)
            .arg("-o")
            .arg(env.path().join("out"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Estimated tokens").not());
    }

    #[test]
    fn peek_without_confirmation_cancels() {
        let env = Env::new();
        let repo = mixed_repo(&env);
        let out = env.path().join("out");

        env.repocat()
            .args(["concat", "--peek", "--path"])
            .arg(&repo)
            .arg("-o")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Files to be included (2)"))
            .stdout(predicate::str::contains("Operation cancelled"));

        assert!(!out.exists());
    }

    #[test]
    fn peek_with_yes_proceeds() {
        let env = Env::new();
        let repo = mixed_repo(&env);
        let out = env.path().join("out");

        env.repocat()
            .args(["concat", "--peek", "-y", "--path"])
            .arg(&repo)
            .arg("-o")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Summary: 2 files to include, 2 files excluded"));

        assert!(out.join("repo-concat-output").is_dir());
    }

    #[test]
    fn missing_source() {
        Env::new()
            .repocat()
            .arg("concat")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No source specified"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn conflicting_sources() {
        Env::new()
            .repocat()
            .args(["scan", "--url", "https://github.com/o/r", "--path", "."])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot specify both"));
    }

    #[test]
    fn missing_local_directory() {
        let env = Env::new();
        env.repocat()
            .args(["scan", "--path"])
            .arg(env.path().join("nope"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Local directory does not exist"));
    }

    #[test]
    fn cache_path_uses_config() {
        let env = Env::new();
        env.repocat()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                env.path().join("cache").to_string_lossy().into_owned(),
            ));
    }

    #[test]
    fn cache_list_empty() {
        Env::new()
            .repocat()
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached repositories"));
    }

    #[test]
    fn cache_prune_empty() {
        Env::new()
            .repocat()
            .args(["cache", "prune"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to prune"));
    }

    #[test]
    fn config_path() {
        let env = Env::new();
        env.repocat()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        Env::new()
            .repocat()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("ttl_secs = 300"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let env = Env::new();
        fs::write(env.path().join("config.toml"), "[cache\n").unwrap();

        env.repocat()
            .args(["cache", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn completions_generate() {
        Env::new()
            .repocat()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("repocat"));
    }
}
