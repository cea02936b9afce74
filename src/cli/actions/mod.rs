pub mod serve;

/// What the parsed command line asks the binary to do.
#[derive(Debug)]
pub enum Action {
    /// Serve the dashboard bundle behind the session gate.
    Serve(serve::Args),
}

impl Action {
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Serve(args) => serve::execute(args).await,
        }
    }
}
