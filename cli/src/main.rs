use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use yokai_cli::read_character;
use yokai_engine::{
    dialog::roll_options,
    logging::init_tracing,
    message::render_roll_card,
    resolve,
    store::{render_character, FileFormat, FileStore},
    tiers::{allocate, TierEntry},
    Attribute, Catalog, Character, CurseResistance, Dice, Localizer, MessageKey, Notice,
    RollRequest, RollResult, RollType,
};

#[derive(Copy, Clone, ValueEnum)]
enum Adv {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll an attribute from flags alone
    Roll {
        /// Attribute to roll (courage, selfControl, wisdom, sharpness)
        #[arg(long)]
        attribute: Attribute,
        /// Attribute value
        #[arg(long, default_value_t = 0)]
        value: i32,
        /// Equipment items carried
        #[arg(long, default_value_t = 0)]
        items: usize,
        /// Advantage mode
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
        /// Add the curse die
        #[arg(long, default_value_t = false)]
        curse: bool,
        /// Bonus of the equipment used
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        bonus: i32,
        /// Checked curse resistance boxes (0-4)
        #[arg(long, default_value_t = 4)]
        remaining: usize,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of rolls; resistance carries over between them
        #[arg(long, default_value_t = 1)]
        rolls: u32,
        #[arg(long, default_value = "en")]
        lang: String,
        /// Print the raw result as JSON instead of the card
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Roll an attribute of a character file, writing curse resistance back to it
    SheetRoll {
        /// Character JSON or YAML
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        attribute: Attribute,
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
        #[arg(long, default_value_t = false)]
        curse: bool,
        /// Name of an equipment item whose bonus applies
        #[arg(long)]
        equipment: Option<String>,
        /// RNG seed; a fresh one when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "en")]
        lang: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write one sheet field of a character file (e.g. system.health.max)
    Set {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        field: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Run the tier allocator; values in order courage,selfControl,wisdom,sharpness
    Tiers {
        #[arg(long, value_delimiter = ',')]
        current: Vec<i32>,
        /// Stored values before the edit (defaults to --current)
        #[arg(long, value_delimiter = ',')]
        previous: Option<Vec<i32>>,
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Print a fresh hunter
    NewHunter {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print a fresh Yokai NPC
    NewNpc {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print what the roll dialog offers for one attribute of a character file
    Options {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        attribute: Attribute,
        #[arg(long, default_value = "en")]
        lang: String,
    },
}

#[derive(Parser)]
#[command(name = "yokai")]
#[command(about = "Yokai Hunters Society sheet and dice harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_roll_type(a: Adv) -> RollType {
    match a {
        Adv::Normal => RollType::Normal,
        Adv::Advantage => RollType::Advantage,
        Adv::Disadvantage => RollType::Disadvantage,
    }
}

fn to_file_format(f: Format) -> FileFormat {
    match f {
        Format::Json => FileFormat::Json,
        Format::Yaml => FileFormat::Yaml,
    }
}

fn load_catalog(lang: &str) -> anyhow::Result<Catalog> {
    Catalog::builtin(lang).with_context(|| format!("no built-in language '{}'", lang))
}

fn print_notices(notices: &[Notice], l10n: &dyn Localizer) {
    for n in notices {
        println!("[{}] {}", n.level, n.render(l10n));
    }
}

fn print_result(name: &str, result: &RollResult, l10n: &dyn Localizer, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", render_roll_card(name, result, l10n));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing("yokai_engine=info");
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll {
            attribute,
            value,
            items,
            adv,
            curse,
            bonus,
            remaining,
            seed,
            rolls,
            lang,
            json,
        } => {
            if remaining > 4 {
                bail!("--remaining must be between 0 and 4, got {}", remaining);
            }
            let l10n = load_catalog(&lang)?;
            let req = RollRequest::new(attribute)
                .with_type(to_roll_type(adv))
                .with_curse(curse)
                .with_bonus(bonus);
            let mut dice = Dice::from_seed(seed);
            let mut resistance = CurseResistance::with_remaining(remaining);
            for i in 0..rolls {
                if i > 0 {
                    println!();
                }
                let res = resolve(&mut dice, &req, value, items, &resistance);
                print_result("Hunter", &res, &l10n, json)?;
                if let Some(updated) = res.updated_curse_resistance {
                    resistance = updated;
                }
            }
        }
        Cmd::SheetRoll {
            file,
            attribute,
            adv,
            curse,
            equipment,
            seed,
            lang,
            json,
        } => {
            let l10n = load_catalog(&lang)?;
            let mut character = read_character(&file)?;
            let bonus = match equipment.as_deref() {
                Some(name) => match character.find_equipment(name) {
                    Some(item) => item.bonus(),
                    None => bail!("{} carries no equipment named '{}'", character.name, name),
                },
                None => 0,
            };
            let req = RollRequest::new(attribute)
                .with_type(to_roll_type(adv))
                .with_curse(curse)
                .with_bonus(bonus);

            let mut store = FileStore::new(&file, character.clone());
            let mut dice = seed.map_or_else(Dice::from_entropy, Dice::from_seed);
            match character.roll_attribute(&req, &mut dice, &mut store) {
                Ok(res) => print_result(&character.name, &res, &l10n, json)?,
                Err(e) => {
                    print_notices(&[Notice::from(&e)], &l10n);
                    return Err(e.into());
                }
            }
        }
        Cmd::Set {
            file,
            field,
            value,
            lang,
        } => {
            let l10n = load_catalog(&lang)?;
            let mut character = read_character(&file)?;
            let notices = character
                .apply_input(&field, &value)
                .with_context(|| format!("cannot set {} on {}", field, character.name))?;
            print_notices(&notices, &l10n);
            FileStore::new(&file, character).save()?;
        }
        Cmd::Tiers {
            current,
            previous,
            lang,
        } => {
            let previous = previous.unwrap_or_else(|| current.clone());
            if current.len() != 4 || previous.len() != 4 {
                bail!("expected 4 comma-separated values (courage,selfControl,wisdom,sharpness)");
            }
            let l10n = load_catalog(&lang)?;
            let entries: Vec<TierEntry> = Attribute::ALL
                .iter()
                .enumerate()
                .map(|(i, &a)| TierEntry::new(a, current[i], previous[i]))
                .collect();
            let alloc = allocate(&entries);
            for slot in &alloc.slots {
                println!(
                    "{:<13} value={} cap={}",
                    l10n.localize(slot.attribute.label()),
                    slot.value,
                    slot.cap
                );
            }
            let notices: Vec<Notice> = alloc
                .rejected
                .iter()
                .map(|s| {
                    Notice::warn(MessageKey::AttributeTierWarning)
                        .with_label("attribute", s.attribute.label())
                        .with("cap", s.cap.to_string())
                })
                .collect();
            print_notices(&notices, &l10n);
        }
        Cmd::NewHunter { name, format } => {
            print!("{}", render_new(&Character::new_hunter(name), format)?);
        }
        Cmd::NewNpc { name, format } => {
            print!("{}", render_new(&Character::new_npc(name), format)?);
        }
        Cmd::Options {
            file,
            attribute,
            lang,
        } => {
            let l10n = load_catalog(&lang)?;
            let character = read_character(&file)?;
            let opts = roll_options(&character, attribute, &l10n);
            println!("{}", serde_json::to_string_pretty(&opts)?);
        }
    }
    Ok(())
}

fn render_new(character: &Character, format: Format) -> anyhow::Result<String> {
    let mut text = render_character(character, to_file_format(format))?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}
