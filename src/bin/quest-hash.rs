use clap::Parser;
use std::io::{self, BufRead};

use quest_tour::auth::{hash_password, verify_password};

/// Print the SHA-256 digest to put in `admin.password_hash`.
#[derive(Parser)]
#[command(name = "quest-hash")]
#[command(about = "Hash an admin password for the quest-tour config", long_about = None)]
struct Cli {
    /// Password to hash; read from stdin when omitted
    password: Option<String>,

    /// Check the password against an existing hash instead
    #[arg(long)]
    verify: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let password = match cli.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    match cli.verify {
        Some(expected) => {
            if verify_password(&password, &expected) {
                println!("match");
            } else {
                eprintln!("Error: password does not match");
                std::process::exit(1);
            }
        }
        None => println!("{}", hash_password(&password)),
    }

    Ok(())
}
