use std::collections::BTreeMap;
use std::fmt;

use relative_path::RelativePathBuf;
use sitecfg_config::ItemContext;
use sitecfg_config::PlaceholderError;
use sitecfg_config::SiteConfig;

use crate::ContentKind;
use crate::Route;
use crate::Source;
use crate::SourcePath;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedItem {
    pub source: SourcePath,
    pub kind: ContentKind,
    pub context: ItemContext,
    pub route: Route,
}

/// An item left out because its patterns need metadata it doesn't have.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub source: SourcePath,
    pub kind: ContentKind,
    pub error: PlaceholderError,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {} `{}`: {}", self.kind, self.source.rel_path, self.error)
    }
}

/// Several items that would be written to the same file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub save_as: RelativePathBuf,
    pub sources: Vec<RelativePathBuf>,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is written by", self.save_as)?;
        for (i, source) in self.sources.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}`{source}`")?;
        }
        Ok(())
    }
}

/// Routes for every content item under a [`Source`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub items: Vec<PlannedItem>,
    pub skipped: Vec<Skipped>,
    pub collisions: Vec<Collision>,
}

impl Plan {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty()
    }
}

pub fn plan(config: &SiteConfig, source: &Source) -> Plan {
    let mut plan = Plan::default();
    for path in source.iter() {
        let Some(kind) = ContentKind::classify(config, &path.rel_path) else {
            log::trace!("{}: not a document", path.rel_path);
            continue;
        };
        let context = crate::item_context(config, kind, &path.rel_path);
        match crate::route(config, kind, &context) {
            Ok(route) => {
                log::trace!("{}: {context} -> {route}", path.rel_path);
                plan.items.push(PlannedItem {
                    source: path,
                    kind,
                    context,
                    route,
                });
            }
            Err(error) => {
                let skipped = Skipped {
                    source: path,
                    kind,
                    error,
                };
                log::warn!("{skipped}");
                plan.skipped.push(skipped);
            }
        }
    }

    let mut writers: BTreeMap<&RelativePathBuf, Vec<RelativePathBuf>> = BTreeMap::new();
    for item in &plan.items {
        writers
            .entry(&item.route.save_as)
            .or_default()
            .push(item.source.rel_path.clone());
    }
    let collisions: Vec<_> = writers
        .into_iter()
        .filter(|(_, sources)| 1 < sources.len())
        .map(|(save_as, sources)| Collision {
            save_as: save_as.clone(),
            sources,
        })
        .collect();
    plan.collisions = collisions;

    plan
}
