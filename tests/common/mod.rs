use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run tempo commands in an isolated temp directory
pub struct TempoTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl TempoTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        // Find the binary - check both debug and release
        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/tempo")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/tempo")
        };

        // If the above doesn't exist, try the alternative
        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            // Fallback to debug
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/tempo").to_string()
        };

        TempoTest {
            temp_dir,
            binary_path,
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to execute tempo command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn data_path(&self) -> PathBuf {
        self.temp_dir.path().join(".tempo").join("data.json")
    }

    pub fn data_exists(&self) -> bool {
        self.data_path().exists()
    }

    pub fn read_data(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.data_path()).expect("Failed to read data file");
        serde_json::from_str(&content).expect("Data file is not valid JSON")
    }

    pub fn write_data(&self, content: &str) {
        let dir = self.temp_dir.path().join(".tempo");
        fs::create_dir_all(&dir).expect("Failed to create .tempo directory");
        fs::write(dir.join("data.json"), content).expect("Failed to write data file");
    }
}
