//! Default CR Service - picks the sample custom resource shipped with a chart.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, Prompter},
    domain::{DomainValidator as validator, Project, Resolution, SampleCandidates},
    error::OpchartResult,
};

/// Selects the default CR among `config/samples/`.
pub struct DefaultCrService {
    filesystem: Arc<dyn Filesystem>,
}

impl DefaultCrService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Return the raw bytes of the default CR.
    ///
    /// The samples directory is listed on every call. `prompter` is asked at
    /// most once, and only when there is more than one entry.
    #[instrument(skip_all, fields(project = %project.name()))]
    pub fn default_cr(&self, project: &Project, prompter: &dyn Prompter) -> OpchartResult<Vec<u8>> {
        validator::validate_layout(project)?;

        let dir = project.samples_dir();
        let entries = self.filesystem.list_dir(&dir)?;
        debug!(dir = %dir.display(), entries = entries.len(), "Samples listed");

        let path = match SampleCandidates::new(dir, entries).resolve()? {
            Resolution::Single(path) => path,
            Resolution::Ask(prompt) => {
                let answer = prompter.ask(&prompt.question())?;
                prompt.answer(&answer)?
            }
        };

        info!(path = %path.display(), "Default CR selected");
        self.filesystem.read_file(&path)
    }
}
