//! Doctor command logic
//!
//! Checks system dependencies and reports issues with suggestions.

use std::path::Path;

use crate::core::manifest::Manifest;
use crate::core::toolchain::ToolchainResolver;

/// Result of a single dependency check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Configuration issues found
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Check if a command is available, returning its version when possible
pub fn check_command_available(command: &str) -> Option<String> {
    let output = std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    extract_version(&combined)
}

/// Extract a version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check the resolved MPI compiler
pub fn check_compiler(compiler: &str) -> CheckResult {
    if which::which(compiler).is_err() {
        return CheckResult::fail(
            "MPI compiler",
            &format!("'{compiler}' not found in PATH"),
            Some("Install an MPI distribution (e.g. OpenMPI or MPICH) or set MPICC"),
            true,
        );
    }
    CheckResult::pass("MPI compiler", check_command_available(compiler), true)
}

/// Check the POSIX shell used to run the dependency build script
pub fn check_shell() -> CheckResult {
    match which::which("sh") {
        Ok(_) => CheckResult::pass("POSIX shell", None, true),
        Err(_) => CheckResult::fail(
            "POSIX shell",
            "'sh' not found in PATH",
            Some("Install a POSIX shell; the dependency build script requires one"),
            true,
        ),
    }
}

/// Check for make, which the dependency build script drives internally
pub fn check_make() -> CheckResult {
    match check_command_available("make") {
        Some(version) => CheckResult::pass("make", Some(version), false),
        None => CheckResult::fail(
            "make",
            "make not found in PATH",
            Some("Install make; the dependency build script uses it to compile the stack"),
            false,
        ),
    }
}

/// Run all doctor checks.
///
/// When a project directory is given, its manifest is inspected too and
/// problems are reported as configuration issues.
pub fn run_doctor(project_dir: Option<&Path>) -> DoctorReport {
    let mut report = DoctorReport::default();

    let compiler = ToolchainResolver::from_environment(None).resolve();
    report.add_check(check_compiler(&compiler));
    report.add_check(check_shell());
    report.add_check(check_make());

    if let Some(dir) = project_dir {
        match Manifest::load(dir) {
            Ok(manifest) => {
                if let Err(e) = manifest.validate() {
                    report.config_issues.push(e.to_string());
                }
                let script = dir.join(&manifest.build.script);
                if !script.exists() {
                    report.config_issues.push(format!(
                        "Dependency build script not found: {}",
                        script.display()
                    ));
                }
            }
            Err(e) => report.config_issues.push(e.to_string()),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_patterns() {
        assert_eq!(
            extract_version("gcc (GCC) 13.2.0"),
            Some("13.2.0".to_string())
        );
        assert_eq!(extract_version("GNU Make 4.4"), Some("4.4".to_string()));
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn test_missing_compiler_fails_with_suggestion() {
        let result = check_compiler("pfftx-no-such-compiler");

        assert!(!result.passed);
        assert!(result.required);
        assert!(result.suggestion.unwrap().contains("MPICC"));
    }

    #[test]
    fn test_shell_check_passes_on_unix() {
        let result = check_shell();

        assert!(result.passed);
    }

    #[test]
    fn test_report_counts() {
        let mut report = DoctorReport::default();
        report.add_check(CheckResult::pass("a", None, true));
        report.add_check(CheckResult::fail("b", "missing", None, true));
        report.add_check(CheckResult::fail("c", "missing", None, false));

        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_required().len(), 1);
        assert!(!report.all_passed());
    }
}
