use crate::{
    config::Config, controller::Controller, error::ClientError, gateway::ChainGateway,
};

/// Controller wired to a live node.
pub type Client = Controller<ChainGateway>;

impl Client {
    /// Connects the configured wallet to the node. Call
    /// [`Controller::on_init`] afterwards to load the current state.
    pub async fn connect(cfg: Config) -> Result<Self, ClientError> {
        let gateway = ChainGateway::connect(&cfg).await?;
        Ok(Controller::new(gateway, cfg.deployment_block))
    }
}
