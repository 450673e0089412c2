use std::error::Error;
use log::LevelFilter;
use rainbow_plots::{logger, rand_data, rainbow_boxplot, BoxplotOptions};

type Err = Box<dyn Error>;

fn main() -> Result<(), Err> {
    logger::init(LevelFilter::Info)?;
    // Random data in the shape of a rainbow.
    let data = rand_data(30, 100, 3., &mut rand::thread_rng())?;
    rainbow_boxplot(&data, "rainbow_boxplot.svg", &BoxplotOptions::default())?;
    Ok(())
}
