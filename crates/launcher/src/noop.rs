use crate::{LauncherError, Opener, Selector};

/// Never picks anything, as if the user aborted.
#[derive(Debug, Default)]
pub struct NoopSelector;

#[async_trait::async_trait]
impl Selector for NoopSelector {
    async fn select(&self, _candidates: Vec<String>) -> Result<Option<String>, LauncherError> {
        Ok(None)
    }
}

#[derive(Debug, Default)]
pub struct NoopOpener;

impl Opener for NoopOpener {
    fn open(&self, _url: &str) -> Result<(), LauncherError> {
        Ok(())
    }
}
