mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::contains;

    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "epsdash";

    const DATA: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT\n\
        1,10,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        2,20,6,2.0,1.9,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        3,30,1,0.5,0.4,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n";

    fn command(dir: &tempfile::TempDir) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path()).env_remove("EPSDASH_DATA").env_remove("RUST_LOG");
        Ok(cmd)
    }

    fn data_dir() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("cleaned_aapl_forecast_data.csv"), DATA)?;
        Ok(dir)
    }

    #[test]
    fn test_output__when_default_data_file_is_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("report");

        cmd.assert().failure().code(2).stderr(contains(
            "Error: cleaned_aapl_forecast_data.csv not found. Please ensure the data cleaning step was run.",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_tui_data_file_is_missing() -> TestResult {
        // The file is checked before the terminal is touched.
        let dir = tempfile::tempdir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["--data", "absent.csv"]);

        cmd.assert().failure().code(2).stderr(contains("absent.csv not found"));
        Ok(())
    }

    #[test]
    fn test_output__report_for_selected_period() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["report", "--fpi", "6", "--width", "40", "--height", "8"]);

        cmd.assert()
            .success()
            .stdout(contains("Univariate Analysis: Distribution of EPS Values for FPI = 6"))
            .stdout(contains("Forecast Period (FPI): 6 | rows: 2"))
            .stdout(contains("Correlation Heatmap of Numerical Variables"))
            .stdout(contains("Recommendations"));
        Ok(())
    }

    #[test]
    fn test_output__report_for_absent_period_is_empty() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["report", "--fpi", "42"]);

        cmd.assert()
            .success()
            .stdout(contains("rows: 0"))
            .stdout(contains("(no data)"));
        Ok(())
    }

    #[test]
    fn test_output__report_data_from_env() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("other.csv");
        std::fs::write(&path, DATA)?;
        let mut cmd = command(&dir)?;
        cmd.env("EPSDASH_DATA", &path).arg("report");

        cmd.assert().success().stdout(contains("FPI = 6"));
        Ok(())
    }

    #[test]
    fn test_logging__rust_log_without_flags() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.env("RUST_LOG", "debug").arg("report");

        cmd.assert().success().stderr(contains("[DEBUG]"));
        Ok(())
    }

    #[test]
    fn test_logging__quiet_overrides_rust_log() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.env("RUST_LOG", "debug").args(["-q", "report"]);

        cmd.assert().success().stderr(predicates::str::is_empty());
        Ok(())
    }

    #[test]
    fn test_output__when_column_is_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("bad.csv"), "ESTIMATOR,ANALYS,FPI,VALUE\n1,10,6,1.0\n")?;
        let mut cmd = command(&dir)?;
        cmd.args(["report", "--data", "bad.csv"]);

        cmd.assert().failure().code(2).stderr(contains("Missing required column: `ACTUAL`"));
        Ok(())
    }

    #[test]
    fn test_export__writes_json_and_svg() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["export", "--out", "out"]);

        cmd.assert().success().stdout(contains("dashboard.json"));

        let out = dir.path().join("out");
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out.join("dashboard.json"))?)?;
        assert_eq!(json["dashboard"]["fpi"], "6");
        assert_eq!(json["fpi_options"], serde_json::json!(["6", "1"]));
        for name in ["distributions.svg", "boxplots.svg", "scatter.svg", "correlation.svg"] {
            assert!(out.join(name).exists(), "{name} missing");
        }
        Ok(())
    }

    #[test]
    fn test_export__is_deterministic() -> TestResult {
        let dir = data_dir()?;
        for out in ["a", "b"] {
            command(&dir)?.args(["export", "--json-only", "--fpi", "1", "--out", out]).assert().success();
        }
        let a = std::fs::read(dir.path().join("a").join("dashboard.json"))?;
        let b = std::fs::read(dir.path().join("b").join("dashboard.json"))?;
        assert_eq!(a, b);
        assert!(!dir.path().join("a").join("scatter.svg").exists());
        Ok(())
    }
}
