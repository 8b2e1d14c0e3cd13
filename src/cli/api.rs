use clap::Parser;
use reqwest::Url;

use crate::{
    api::{Client, hotspot, wallet},
    cli::session::SessionArgs,
    prelude::*,
};

#[derive(Parser)]
pub struct ApiArgs {
    /// KonnectX API base URL.
    #[clap(
        long = "api-base-url",
        env = "KONNECTX_API_BASE_URL",
        default_value = "http://localhost:5000/api"
    )]
    base_url: Url,

    /// Bearer token. Defaults to the token of the signed-in session.
    #[clap(long = "api-token", env = "KONNECTX_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[clap(long, env = "KONNECTX_REQUEST_TIMEOUT", default_value = "15s")]
    request_timeout: humantime::Duration,

    #[clap(flatten)]
    session: SessionArgs,
}

impl ApiArgs {
    pub fn client(&self) -> Result<Client> {
        let token = match &self.token {
            Some(token) => Some(token.clone()),
            None => self.session.open()?.token().map(ToOwned::to_owned),
        };
        Client::new(self.base_url.clone(), token.as_deref(), *self.request_timeout)
    }

    pub fn hotspot_api(&self) -> Result<hotspot::Api> {
        Ok(hotspot::Api::new(self.client()?))
    }

    pub fn wallet_api(&self) -> Result<wallet::Api> {
        Ok(wallet::Api::new(self.client()?))
    }
}
