use std::{env, error::Error};
use log::LevelFilter;
use rainbow_plots::{logger, load_gps_data, gps_plot, GpsPlotOptions};

type Err = Box<dyn Error>;

fn main() -> Result<(), Err> {
    logger::init(LevelFilter::Info)?;
    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        let prog = env::args().next().unwrap_or_else(|| "gps_track".into());
        return Err(format!("usage: {prog} TRACK.gpx...").into())
    }
    let coordinates = load_gps_data(&paths)?;
    gps_plot(&coordinates, "gps_track.svg", &GpsPlotOptions::default())?;
    Ok(())
}
