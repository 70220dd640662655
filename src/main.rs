#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use anyhow::Result;
    use clap::{Parser, Subcommand};
    use folio::config::Settings;

    use crate::cli;

    /// folio - behavior layer of the portfolio page
    #[derive(Parser)]
    #[command(name = "folio")]
    #[command(about = "Run the portfolio page behaviors outside the browser", long_about = None)]
    struct Cli {
        /// Path to configuration file
        #[arg(long, global = true)]
        config: Option<String>,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Validate a contact form submission
        Validate {
            #[arg(long, default_value = "")]
            name: String,

            #[arg(long, default_value = "")]
            email: String,

            #[arg(long, default_value = "")]
            subject: String,

            #[arg(long, default_value = "")]
            message: String,

            /// Message language (overrides config file)
            #[arg(long)]
            locale: Option<String>,
        },
        /// Replay a scripted session and print the resulting page
        Replay {
            /// JSON replay script
            script: String,
        },
    }

    pub fn main() -> Result<ExitCode> {
        let cli = Cli::parse();

        let settings = Settings::load(cli.config)?;
        settings.validate().map_err(|e| anyhow::anyhow!(e))?;

        folio::observability::init_observability(&settings.observability.log_level)?;

        match cli.command {
            Commands::Validate {
                name,
                email,
                subject,
                message,
                locale,
            } => {
                let data = folio_contact::FormData {
                    name,
                    email,
                    subject,
                    message,
                };
                let locale = locale.unwrap_or(settings.contact.locale);

                cli::validate::run(&data, &locale)
            }
            Commands::Replay { script } => cli::replay::run(&script, settings.app_options()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<std::process::ExitCode> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
