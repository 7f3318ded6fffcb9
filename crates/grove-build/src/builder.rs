//! Public build entry points.

use tracing::{debug, instrument};

use grove_core::{Forest, ForestStats, NodeKey, Record, TreeConfig, TreeNode, TreeResult};

use crate::assemble::assemble;
use crate::entry::Entry;
use crate::index::ParentIndex;

/// Incremental forest builder.
///
/// Records may be appended in several batches; [`ForestBuilder::build`]
/// consumes the builder, so a built forest can no longer grow.
#[derive(Debug)]
pub struct ForestBuilder<'a> {
    config: &'a TreeConfig,
    root_parent: Option<NodeKey>,
    entries: Vec<Entry>,
}

impl<'a> ForestBuilder<'a> {
    /// Create a builder whose roots are the records with parent `root_parent`
    /// (None = records without a parent).
    ///
    /// Fails if the config keys are empty or collide.
    pub fn new(config: &'a TreeConfig, root_parent: Option<NodeKey>) -> TreeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            root_parent,
            entries: Vec::new(),
        })
    }

    /// Append a batch of records.
    ///
    /// All records of the batch are checked before any is kept: on error the
    /// builder is left as it was. Error indices count from the first record
    /// ever appended.
    pub fn append<R: Record>(&mut self, records: impl IntoIterator<Item = R>) -> TreeResult<&mut Self> {
        let offset = self.entries.len();
        let batch = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Entry::from_record(&record, self.config, offset + i))
            .collect::<TreeResult<Vec<_>>>()?;
        self.entries.extend(batch);
        Ok(self)
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no records were appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assemble the forest.
    #[instrument(level = "debug", skip(self), fields(records = self.entries.len()))]
    pub fn build(self) -> Forest {
        let root_parent = self.root_parent.as_ref();
        let mut stats = ForestStats::new();
        stats.input_records = self.entries.len();

        let mut index = ParentIndex::new(self.entries);
        let mut warnings = std::mem::take(&mut index.duplicates);
        warnings.extend(index.orphans(root_parent));
        for warning in &warnings {
            stats.record_warning(warning.kind);
        }
        stats.unreachable = index.entries.len() - index.reachable(root_parent);

        let assembly = assemble(index, root_parent, self.config, &mut stats);
        warnings.extend(assembly.warnings);

        debug!(
            nodes = stats.nodes,
            roots = stats.roots,
            orphans = stats.orphans,
            unreachable = stats.unreachable,
            cycles = stats.cycles_broken,
            duplicates = stats.duplicate_ids,
            truncated = stats.truncated,
            "forest assembled"
        );

        Forest::new(assembly.roots, stats, warnings)
    }
}

/// Build the forest hanging off `root_parent` and return its roots.
///
/// Fails only on invalid input: colliding or empty config keys, or a record
/// without an identifier. Orphans, cycles, duplicate identifiers and missing
/// weights are absorbed.
pub fn build<R: Record>(
    records: impl IntoIterator<Item = R>,
    root_parent: Option<&NodeKey>,
    config: &TreeConfig,
) -> TreeResult<Vec<TreeNode>> {
    build_forest(records, root_parent, config).map(Forest::into_roots)
}

/// Like [`build`], keeping the stats and warnings of the run.
pub fn build_forest<R: Record>(
    records: impl IntoIterator<Item = R>,
    root_parent: Option<&NodeKey>,
    config: &TreeConfig,
) -> TreeResult<Forest> {
    let mut builder = ForestBuilder::new(config, root_parent.cloned())?;
    builder.append(records)?;
    Ok(builder.build())
}
