use std::path::Path;

use anyhow::{anyhow, bail};
use serde::Deserialize;
use touchframe::{split_method_title, Block, Config, Method, MethodDef, Stage};

use crate::{
    args::Options,
    utils::{parse_toml, read_file_to_string},
};

/// The contents of an input file, parsed directly from the TOML.  Like an AST, this can describe
/// things which can't be rung, so it has to be [`lower`](Self::lower)ed into a [`Job`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlFile {
    /// The method to ring, as it would be stored in a method library
    method: MethodDef,
    /// Overridden by the `--max-rows` CLI argument
    #[serde(default)]
    config: Config,
    /// If `true`, an extra bell covers behind the method
    #[serde(default)]
    cover: bool,

    /// A touch like `"PPPB"`, rung instead of a plain course
    touch: Option<String>,
    /// A number of plain leads, rung instead of a plain course
    plain_leads: Option<usize>,
}

impl TomlFile {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        parse_toml(&read_file_to_string(path)?)
    }

    /// Check that this file describes some ringing, and parse everything that needs parsing
    pub fn lower(self, options: &Options) -> anyhow::Result<Job> {
        let TomlFile {
            mut method,
            mut config,
            cover,
            touch,
            plain_leads,
        } = self;

        // Allow `name` to be a full title, as long as its stage agrees
        let (name, title_stage) = split_method_title(&method.name);
        let name = name.to_owned();
        match title_stage {
            Some(stage) if stage != method.stage => bail!(
                "{:?} is a {} method, but `stage` is {}",
                method.name,
                stage,
                method.stage
            ),
            Some(_) => method.name = name,
            None => {}
        }

        let built_method = method.build().map_err(|e| {
            anyhow!("Can't build {} {}: {}", method.name, method.stage, e)
        })?;
        let block_stage = match cover {
            true => built_method
                .stage()
                .with_cover()
                .ok_or_else(|| anyhow!("Can't add a cover bell to {}", built_method.stage()))?,
            false => built_method.stage(),
        };
        let ringing = match (touch, plain_leads) {
            (Some(_), Some(_)) => bail!("Can't ring both a `touch` and `plain_leads`"),
            (Some(touch), None) => Ringing::Touch(touch),
            (None, Some(num_leads)) => Ringing::PlainLeads(num_leads),
            (None, None) => Ringing::PlainCourse,
        };
        if let Some(max_rows) = options.max_rows {
            config.max_rows = max_rows;
        }

        Ok(Job {
            method: built_method,
            block_stage,
            ringing,
            config,
        })
    }
}

/// What should be rung
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ringing {
    PlainCourse,
    PlainLeads(usize),
    Touch(String),
}

/// A fully parsed description of what to ring
#[derive(Debug, Clone)]
pub struct Job {
    pub method: Method,
    /// The [`Stage`] of the [`Block`] being rung onto.  This is bigger than the method's
    /// [`Stage`] if a cover bell is being rung.
    pub block_stage: Stage,
    pub ringing: Ringing,
    pub config: Config,
}

impl Job {
    /// Ring this `Job` onto a new [`Block`].  If ringing fails, the rows rung before the error
    /// are returned alongside it.
    pub fn run(&self) -> (Block, Option<touchframe::Error>) {
        let mut block = Block::with_lead_len(self.block_stage, self.method.lead_len());
        let result = match &self.ringing {
            Ringing::PlainCourse => self
                .method
                .ring_plain_course_with(&mut block, &self.config),
            Ringing::PlainLeads(num_leads) => self
                .method
                .ring_plain_leads(&mut block, *num_leads)
                .map_err(touchframe::Error::from),
            Ringing::Touch(touch) => self.method.ring_touch_with(&mut block, touch, &self.config),
        };
        (block, result.err())
    }
}
