//! Contact form submission

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use freshpod_core::config::SiteConfig;
use freshpod_core::contact::{
    ContactClient, ContactForm, HttpContactTransport, Interest, SubmitRateLimiter,
};
use freshpod_core::error::ContactError;

/// Contact subcommand
#[derive(Parser, Debug)]
pub struct ContactCommand {
    #[clap(subcommand)]
    pub command: ContactSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContactSubcommand {
    /// Send a contact request to the relay
    Send {
        #[clap(long)]
        name: String,

        /// Ten-digit phone number
        #[clap(long)]
        phone: String,

        #[clap(long)]
        email: String,

        #[clap(long)]
        message: String,

        /// individual, distribution or corporate
        #[clap(long)]
        interest: Option<Interest>,

        /// State (sent only for distribution enquiries)
        #[clap(long)]
        state: Option<String>,

        /// Output the outcome as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show how long until the next submission is allowed
    Status,

    /// Forget the last successful submission
    Reset,
}

impl ContactCommand {
    pub async fn execute(self, config: &SiteConfig) -> Result<()> {
        match self.command {
            ContactSubcommand::Send {
                name,
                phone,
                email,
                message,
                interest,
                state,
                json,
            } => {
                let mut form = ContactForm::new(&name, &phone, &email, &message);
                if let Some(interest) = interest {
                    form = form.with_interest(interest);
                }
                if let Some(state) = state.as_deref() {
                    form = form.with_state(state);
                }
                execute_send(config, &form, json).await
            }
            ContactSubcommand::Status => execute_status(config),
            ContactSubcommand::Reset => {
                let cache = SiteConfig::file_cache()?;
                SubmitRateLimiter::forget(&cache)?;
                println!("Contact rate limit cleared");
                Ok(())
            }
        }
    }
}

async fn execute_send(config: &SiteConfig, form: &ContactForm, json_output: bool) -> Result<()> {
    let cache = SiteConfig::file_cache().context("Failed to locate cache directory")?;
    let limiter = SubmitRateLimiter::restore(config.contact.rate_limit(), &cache);
    let transport = HttpContactTransport::new(config.contact.endpoint.clone(), config.contact.timeout());

    let mut client = ContactClient::new(Box::new(transport), limiter, config.contact.site_key());
    let outcome = client.submit_now(form).await;

    if outcome.is_success() {
        if let Err(e) = client.limiter().persist(&cache) {
            tracing::warn!("Failed to save contact limiter state: {:#}", e);
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.message);
    }

    if !outcome.is_success() {
        bail!("Contact request was not sent");
    }

    Ok(())
}

fn execute_status(config: &SiteConfig) -> Result<()> {
    let cache = SiteConfig::file_cache()?;
    let limiter = SubmitRateLimiter::restore(config.contact.rate_limit(), &cache);

    match limiter.check(Utc::now()) {
        Ok(()) => println!("Ready to send"),
        Err(ContactError::RateLimited { retry_in, .. }) => {
            println!("Next submission allowed in {retry_in}s");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
