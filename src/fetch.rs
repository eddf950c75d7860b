use std::{fs, path::PathBuf};

use _model::Dataset;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};
use ureq::{Agent, AgentBuilder};
use url::Url;

use crate::{
    app::App,
    surface::{DisplaySurface, UiSurface},
    Result,
};

pub fn agent() -> Agent {
    AgentBuilder::new()
        .user_agent(concat!("grocery-map/", env!("CARGO_PKG_VERSION")))
        .build()
}

pub fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {pos}/{len} layers {msg}")
            .expect("hardcoded"),
    )
}

/// Where layer URLs are resolved: a web root or a local directory.
pub enum Source {
    Http { agent: Agent, base: Url },
    Dir(PathBuf),
}

impl Source {
    pub fn parse(base: &str) -> Result<Self> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let mut base = Url::parse(base)?;
            // so joining keeps the last path segment
            if !base.path().ends_with('/') {
                base.set_path(&format!("{}/", base.path()));
            }
            Ok(Self::Http {
                agent: agent(),
                base,
            })
        } else {
            Ok(Self::Dir(PathBuf::from(base)))
        }
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        match self {
            Self::Http { agent, base } => {
                let url = base.join(relative)?;
                Ok(agent.get(url.as_str()).call()?.into_string()?)
            }
            Self::Dir(dir) => Ok(fs::read_to_string(dir.join(relative))?),
        }
    }

    pub fn load(&self, relative: &str) -> Result<Dataset> {
        Ok(Dataset::from_geojson(&self.read(relative)?)?)
    }
}

/// Loads every configured layer into the app. A layer that fails to load is
/// logged and left without an overlay. Returns how many layers loaded.
pub fn bootstrap<D: DisplaySurface, U: UiSurface>(
    app: &mut App<D, U>,
    source: &Source,
    progress: &ProgressBar,
) -> usize {
    let layers: Vec<_> = app
        .config()
        .layers
        .iter()
        .map(|x| (x.id.clone(), x.url.clone()))
        .collect();

    let mut loaded = 0;
    for (id, url) in layers {
        progress.set_message(id.clone());
        match source.load(&url) {
            Ok(dataset) => {
                app.load_dataset(&id, dataset);
                loaded += 1;
            }
            Err(err) => error!(layer = %id, url = %url, error = %err, "failed to load layer"),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(loaded, "bootstrap finished");
    loaded
}
