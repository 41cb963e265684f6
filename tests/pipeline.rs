use std::{fs, path::PathBuf};

use surface_temp::{load_records, prepare, run, Error, LoadError, MonthAxis, PlotConfig};

fn write_csv(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("temperature.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn two_january_days() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        &dir,
        "day,month,year,depth,temperature\n\
         1,1,2020,3,5.0\n\
         15,1,2020,3,7.0\n",
    );

    let records = load_records(&input).unwrap();
    let (days, trend) = prepare(&records, &PlotConfig::default());

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day_of_year, 1);
    assert_eq!(days[0].mean_temperature, Some(5.0));
    assert_eq!(days[1].day_of_year, 15);
    assert_eq!(days[1].mean_temperature, Some(7.0));

    // two days are too few for a trend line
    assert!(trend.is_empty());

    let months = MonthAxis::new();
    let end_of_january = months
        .ticks()
        .iter()
        .find(|tick| tick.position == 31.0)
        .unwrap();
    assert!(end_of_january.tick_visible);
    assert_eq!(end_of_january.text(), "");

    let january = months
        .ticks()
        .iter()
        .find(|tick| tick.position == 15.5)
        .unwrap();
    assert!(!january.tick_visible);
    assert_eq!(january.text(), "J");
}

#[test]
fn weekly_series_with_noise() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("day,month,year,depth,temperature\n");
    for (day, month) in [(3, 2), (10, 2), (17, 2)] {
        csv.push_str(&format!("{day},{month},2021,2,10.0\n"));
        csv.push_str(&format!("{day},{month},2021,4,12.0\n"));
        // too deep
        csv.push_str(&format!("{day},{month},2021,30,2.0\n"));
        // sensor fault
        csv.push_str(&format!("{day},{month},2021,1,-1.0\n"));
    }
    csv.push_str("24,2,2021,3,NA\n");
    csv.push_str("3,3,2021,40,15.0\n");
    let input = write_csv(&dir, &csv);

    let records = load_records(&input).unwrap();
    assert_eq!(records.len(), 14);

    let (days, _) = prepare(&records, &PlotConfig::default());
    let summary: Vec<(u16, Option<f64>)> = days
        .iter()
        .map(|day| (day.day_of_year, day.mean_temperature))
        .collect();
    assert_eq!(
        summary,
        [(34, Some(11.0)), (41, Some(11.0)), (48, Some(11.0)), (55, None)]
    );
}

#[test]
fn missing_input_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlotConfig {
        output_dir: dir.path().join("figures"),
        ..PlotConfig::default()
    };

    let result = run(&dir.path().join("absent.csv"), &config);
    assert!(matches!(result, Err(Error::Load(LoadError::Open(_)))));
    assert!(!config.output_dir.exists());
}

#[test]
#[ignore = "needs a system font for the axis labels"]
fn writes_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("day,month,year,depth,temperature\n");
    for week in 0..52u16 {
        let date = time::Date::from_ordinal_date(2021, 1 + week * 7).unwrap();
        let temperature = 12.0 + 8.0 * ((f64::from(week) - 13.0) / 52.0 * std::f64::consts::TAU).sin();
        csv.push_str(&format!(
            "{},{},{},2,{temperature:.2}\n",
            date.day(),
            date.month() as u8,
            date.year()
        ));
    }
    let input = write_csv(&dir, &csv);

    let config = PlotConfig {
        dpi: 72,
        output_dir: dir.path().join("figures"),
        ..PlotConfig::default()
    };
    let outputs = run(&input, &config).unwrap();

    for path in [outputs.day_of_year, outputs.month_axis] {
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
