use std::io::{self, Write};
use std::process;

use anyhow::{anyhow, Context};
use auth_hmac::mock_request::MockRequest;
use auth_hmac::{AuthHmac, SigningExt, SimpleCredentialStore, VerifyingExt};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
enum Mode {
    /// Print the canonical string of the request
    Canonicalize,
    /// Sign the request and print it
    Sign,
    /// Exit with a non-zero status unless the request is authenticated
    Verify,
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Signs and verifies HTTP requests read from stdin.")]
struct Opt {
    #[structopt(subcommand)]
    mode: Mode,

    /// The access key ID to sign with, or to accept when verifying.
    #[structopt(short, long, global = true, env = "AUTH_HMAC_ACCESS_KEY_ID")]
    access_key_id: Option<String>,

    /// The shared secret for the access key ID.
    #[structopt(short, long, global = true, env = "AUTH_HMAC_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// The service ID prefixing the Authorization header.
    #[structopt(long, global = true)]
    service_id: Option<String>,
}

impl Opt {
    fn config(&self) -> anyhow::Result<AuthHmac> {
        let mut store = SimpleCredentialStore::default();
        if let Some(access_key_id) = &self.access_key_id {
            let secret = self
                .secret
                .as_ref()
                .ok_or_else(|| anyhow!("No secret provided for {:?}", access_key_id))?;
            store.add(access_key_id, secret);
        }

        let mut config = AuthHmac::new(store);
        if let Some(service_id) = &self.service_id {
            config.set_service_id(service_id);
        }
        Ok(config)
    }

    fn access_key_id(&self) -> anyhow::Result<&str> {
        self.access_key_id
            .as_deref()
            .ok_or_else(|| anyhow!("No access key ID provided"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opt = Opt::from_args();
    let config = opt.config()?;

    let mut req = MockRequest::from_reader(&mut io::stdin().lock())
        .map_err(|e| anyhow!("{}", e))
        .context("Failed to parse request")?;

    log::info!("{:?}", req);

    match opt.mode {
        Mode::Canonicalize => {
            let res = config.canonical_string(&mut req)?;
            io::stdout().lock().write_all(res.as_bytes())?;
        }
        Mode::Sign => {
            req.sign(&config, opt.access_key_id()?)?;
            req.write(&mut io::stdout().lock())
                .map_err(|e| anyhow!("{}", e))?;
        }
        Mode::Verify => match req.authenticated_access_key(&config) {
            Some(access_key_id) => log::info!("Authenticated as {:?}", access_key_id),
            None => {
                eprintln!("Request is not authenticated");
                process::exit(1);
            }
        },
    }

    Ok(())
}
