//! Accumulation state of the checkpoint walk
//!
//! One window of the walk spans the commits between two boundaries
//! (checkpoint or reset). The state tracks what the open window holds: the
//! patch files registered so far, how many linear commits contributed, and
//! whether the window boundary behind us was a tag checkpoint. The builder
//! consults it to decide when untagged work must be flushed into a
//! synthetic checkpoint instead of being dropped.

/// Mutable state carried across the commit walk
#[derive(Debug, Default)]
pub struct SeriesState {
    pending_files: Vec<String>,
    commits_since_clear: usize,
    tagged_since_clear: bool,
}

impl SeriesState {
    /// Account for one linear commit whose patch file was registered
    ///
    /// Opens (or extends) an untagged window: a later tag or reset has to
    /// resolve it.
    pub fn record_patch(&mut self, file_name: String) {
        if !self.pending_files.contains(&file_name) {
            self.pending_files.push(file_name);
        }
        self.commits_since_clear += 1;
        self.tagged_since_clear = false;
    }

    /// A tag checkpoint was committed for the current commit
    pub fn mark_tagged(&mut self) {
        self.tagged_since_clear = true;
    }

    /// The window was written out as a checkpoint; start the next one empty
    ///
    /// Leaves `tagged_since_clear` alone: the caller knows whether the
    /// checkpoint was a tag or a synthetic marker.
    pub fn flush(&mut self) {
        self.pending_files.clear();
        self.commits_since_clear = 0;
    }

    /// A reset boundary was crossed; the next window starts untagged
    pub fn clear(&mut self) {
        self.flush();
        self.tagged_since_clear = false;
    }

    /// Does the open window hold work no checkpoint has recorded yet?
    pub fn has_unresolved_changes(&self) -> bool {
        !self.tagged_since_clear
            && (!self.pending_files.is_empty() || self.commits_since_clear > 0)
    }

    /// Patch files registered in the open window, in commit order
    pub fn pending_files(&self) -> &[String] {
        &self.pending_files
    }
}
