use crate::{ClusterError, Result};
use std::{path::Path, process::Command};

/// Invoke an external plotting script as `<interpreter> <script> <csv>`.
///
/// A missing script, an interpreter that cannot be started, or a non-zero exit status are all
/// reported as [`ClusterError::PlotScript`]; callers are expected to treat this as non-fatal.
pub fn run_plot_script(interpreter: &str, script: &Path, csv: &Path) -> Result<()> {
    let plot_error = |reason: String| ClusterError::PlotScript { script: script.display().to_string(), reason };

    if !script.is_file() {
        return Err(plot_error("script not found".to_string()));
    }
    let status = Command::new(interpreter)
        .arg(script)
        .arg(csv)
        .status()
        .map_err(|e| plot_error(format!("cannot start `{}`: {}", interpreter, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(plot_error(format!("exited with {}", status)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let res = run_plot_script("python3", &dir.path().join("nope.py"), &dir.path().join("output.csv"));
        assert!(matches!(res, Err(ClusterError::PlotScript { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let (ok, fail) = (dir.path().join("ok.sh"), dir.path().join("fail.sh"));
        std::fs::write(&ok, "exit 0\n").unwrap();
        std::fs::write(&fail, "exit 3\n").unwrap();
        let csv = dir.path().join("output.csv");

        assert!(run_plot_script("sh", &ok, &csv).is_ok());
        assert!(matches!(run_plot_script("sh", &fail, &csv), Err(ClusterError::PlotScript { .. })));
        assert!(matches!(
            run_plot_script("/nonexistent/interpreter", &ok, &csv),
            Err(ClusterError::PlotScript { .. })
        ));
    }
}
