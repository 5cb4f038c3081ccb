use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use yokai_cli::read_character;
use yokai_engine::{
    logging::init_tracing, resolve, Attribute, CurseResistance, Dice, Outcome, RollRequest,
    RollType,
};

#[derive(Parser)]
#[command(name = "simulate-rolls")]
#[command(about = "Monte Carlo sim: outcome distribution of one attribute roll")]
struct Args {
    /// Attribute to roll
    #[arg(long, default_value = "courage")]
    attribute: Attribute,

    /// Attribute value (ignored with --file)
    #[arg(long, default_value_t = 2)]
    value: i32,

    /// Equipment items carried (ignored with --file)
    #[arg(long, default_value_t = 0)]
    items: usize,

    /// Number of trials
    #[arg(long, default_value_t = 10000)]
    trials: u32,

    /// Roll type: normal | advantage | disadvantage
    #[arg(long, default_value = "normal")]
    adv: RollType,

    /// Add the curse die every trial
    #[arg(long, default_value_t = false)]
    curse: bool,

    /// Equipment bonus
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    bonus: i32,

    /// Checked curse resistance boxes at the start of every trial
    #[arg(long, default_value_t = 4)]
    remaining: usize,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Optional character JSON/YAML supplying value, items and resistance
    #[arg(long)]
    file: Option<PathBuf>,
}

fn pct(n: u32, of: u32) -> f64 {
    if of == 0 {
        0.0
    } else {
        n as f64 * 100.0 / of as f64
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing("yokai_engine=warn");
    let args = Args::parse();
    if args.remaining > 4 {
        anyhow::bail!("--remaining must be between 0 and 4, got {}", args.remaining);
    }

    let (label, value, items, resistance) = match &args.file {
        Some(path) => {
            let c = read_character(path)?;
            let value = c
                .system
                .attributes
                .get(args.attribute)
                .with_context(|| format!("{} has no {} value", c.name, args.attribute))?;
            (c.name.clone(), value, c.equipment_count(), c.curse_resistance())
        }
        None => (
            "flags".to_string(),
            args.value,
            args.items,
            CurseResistance::with_remaining(args.remaining),
        ),
    };

    let req = RollRequest::new(args.attribute)
        .with_type(args.adv)
        .with_curse(args.curse)
        .with_bonus(args.bonus);

    let (mut success, mut bad_omen, mut failure, mut fallen) = (0u32, 0u32, 0u32, 0u32);
    let mut total_sum: i64 = 0;
    for i in 0..args.trials {
        let mut dice = Dice::from_seed(args.seed.wrapping_add(i as u64));
        let res = resolve(&mut dice, &req, value, items, &resistance);
        match res.outcome {
            Outcome::Success => success += 1,
            Outcome::BadOmen => bad_omen += 1,
            Outcome::Failure => failure += 1,
        }
        if res.curse_fallen {
            fallen += 1;
        }
        total_sum += i64::from(res.final_total);
    }

    let effective = req.normalized(&resistance);
    let avg_total = if args.trials > 0 {
        total_sum as f64 / args.trials as f64
    } else {
        0.0
    };

    println!("simulate-rolls results");
    println!("----------------------");
    println!("source:             {}", label);
    println!("attribute:          {} = {}", args.attribute, value);
    println!("equipment carried:  {}", items);
    println!("roll:               {} ({})", effective.roll_type, effective.roll_type.formula());
    println!("curse die:          {}", effective.curse_roll);
    println!("resistance:         {}", resistance);
    println!("trials:             {}", args.trials);
    println!();
    println!("success:            {:.1}%", pct(success, args.trials));
    println!("bad omen:           {:.1}%", pct(bad_omen, args.trials));
    println!("failure:            {:.1}%", pct(failure, args.trials));
    println!("avg total:          {:.2}", avg_total);
    println!("curse fell:         {:.1}%", pct(fallen, args.trials));
    Ok(())
}
