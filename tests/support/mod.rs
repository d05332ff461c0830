#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use taskpad::task::Task;

/// Isolated data directory plus config file for one test.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("data"))?;
        fs::write(dir.path().join("config.toml"), "")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.config_path(), contents)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    pub fn write_tasks_raw(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.tasks_file(), contents)
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let path = self.tasks_file();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskpad").expect("binary");
        cmd.env_remove("TASKPAD_DIR")
            .env_remove("RUST_LOG")
            .env("TASKPAD_CONFIG", self.config_path())
            .arg("--data-dir")
            .arg(self.data_dir());
        cmd
    }
}
