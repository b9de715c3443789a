use advanced_dice::{genesys, MarkdownStringifier, RollConfig};
use std::io::{self, BufRead, Write};

const GENESYS_PREFIX: &str = "genesys ";

fn roll_line(line: &str, config: &RollConfig) -> Result<String, advanced_dice::Error> {
    let mut rng = rand::thread_rng();

    if let Some(notation) = line.strip_prefix(GENESYS_PREFIX) {
        let result = genesys::roll(notation, &mut rng, config, &())?;
        let tally = result.tally();
        let mut ret = format!(
            "{}: net success `{}`, net advantage `{}`",
            result.notation(),
            result.net_success(),
            result.net_advantage()
        );
        if tally.triumph > 0 {
            ret.push_str(&format!(", triumph {}", tally.triumph));
        }
        if tally.despair > 0 {
            ret.push_str(&format!(", despair {}", tally.despair));
        }
        if tally.light > 0 || tally.dark > 0 {
            ret.push_str(&format!(", light {} / dark {}", tally.light, tally.dark));
        }
        for (name, group) in result.groups() {
            ret.push_str(&format!(
                "\n  {}: net success `{}`, net advantage `{}`",
                name,
                group.net_success(),
                group.net_advantage()
            ));
        }
        return Ok(ret);
    }

    let ast = advanced_dice::parse(line)?;
    let result = advanced_dice::evaluate_with(&ast, &mut rng, config)?;
    Ok(MarkdownStringifier::new().stringify(&ast, &result))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = RollConfig::from_env()?;
    log::debug!("starting with {:?}", config);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let line = line.trim();
        if !line.is_empty() {
            match roll_line(line, &config) {
                Ok(r) => println!("{}", r),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
