use std::process::ExitCode;

use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use sigma_zkp::{
    GroupConfig, GroupSetup, Proof, SchnorrProver, SchnorrVerifier, SecureRng, SignatureVerifier,
    Signer, config,
};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "sigma")]
#[command(about = "Schnorr signatures from Sigma-protocol proofs of knowledge", long_about = None)]
#[command(version)]
struct Cli {
    /// Use the built-in RFC 5114 group instead of config/group.toml and SIGMA_* variables
    #[arg(long, env = "SIGMA_RFC5114", default_value = "false")]
    rfc5114: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the active group parameters
    Params,

    /// Sign a message with a secret exponent
    Sign {
        /// Secret exponent, hex
        #[arg(short, long)]
        secret: String,

        /// Message, hex
        #[arg(short, long)]
        message: String,
    },

    /// Verify a signature against a public key
    Verify {
        /// Public key `g^x mod p`, hex
        #[arg(short, long)]
        public: String,

        /// Message, hex
        #[arg(short, long)]
        message: String,

        /// Encoded signature, as printed by `sign`
        #[arg(short, long)]
        signature: String,
    },
}

fn parse_hex(what: &str, value: &str) -> Result<BigUint, String> {
    config::parse_hex(what, value).map_err(|e| e.to_string())
}

fn load_setup(rfc5114: bool) -> Result<GroupSetup, String> {
    let config = if rfc5114 {
        GroupConfig::rfc5114()
    } else {
        GroupConfig::from_env().map_err(|e| format!("Failed to load configuration: {e}"))?
    };
    config.setup().map_err(|e| format!("Invalid group parameters: {e}"))
}

fn run(cli: Cli) -> Result<bool, String> {
    let setup = load_setup(cli.rfc5114)?;
    info!(bits = setup.group.p().bits(), "group loaded");

    match cli.command {
        Commands::Params => {
            println!("p = {:x}", setup.group.p());
            println!("q = {:x}", setup.group.q());
            println!("g = {:x}", setup.g);
            if let Some(h) = &setup.h {
                println!("h = {h:x}");
            }
            for (i, base) in setup.bases.iter().enumerate() {
                println!("bases[{i}] = {base:x}");
            }
            Ok(true)
        }
        Commands::Sign { secret, message } => {
            let secret = parse_hex("secret", &secret)?;
            let message = parse_hex("message", &message)?;

            let mut prover =
                SchnorrProver::new(setup.group, setup.g, secret).map_err(|e| e.to_string())?;
            let signature = prover
                .sign(&message, &mut SecureRng::new())
                .map_err(|e| format!("Signing failed: {e}"))?;

            println!("public = {:x}", prover.public_key());
            println!(
                "signature = {}",
                signature.to_hex().map_err(|e| e.to_string())?
            );
            Ok(true)
        }
        Commands::Verify {
            public,
            message,
            signature,
        } => {
            let public = parse_hex("public key", &public)?;
            let message = parse_hex("message", &message)?;
            let signature = Proof::from_hex(&signature).map_err(|e| e.to_string())?;

            let verifier = SchnorrVerifier::new(setup.group, setup.g, public);
            let valid = verifier.verify_signature(&message, signature.values());
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(valid)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
