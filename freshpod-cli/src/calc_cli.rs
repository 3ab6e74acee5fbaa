//! ROI calculator command

use anyhow::Result;
use clap::Args;

use freshpod_core::calculator::{format_inr, RoiInput};

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Price of one machine (₹)
    #[clap(long, default_value = "")]
    machine_cost: String,

    /// Number of machines
    #[clap(long, default_value = "")]
    machines: String,

    /// Cleaning price per helmet (₹)
    #[clap(long, default_value = "")]
    price: String,

    /// Cleans per day, per machine
    #[clap(long, default_value = "")]
    cleans: String,

    /// Output as JSON
    #[clap(long)]
    json: bool,
}

pub fn execute(args: CalcArgs) -> Result<()> {
    let input = RoiInput::parse(&args.machine_cost, &args.machines, &args.price, &args.cleans)?;
    let result = input.calculate();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Daily income:    {}", format_inr(result.daily));
    println!("Monthly income:  {}", format_inr(result.monthly));
    println!("Yearly income:   {}", format_inr(result.yearly));
    println!("Investment:      {}", format_inr(result.total_cost));
    println!("Days to ROI:     {}", result.days_to_roi_display());

    Ok(())
}
