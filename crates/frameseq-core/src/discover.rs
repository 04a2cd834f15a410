//! Entry points that list a directory and build sequences from it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use frameseq_pattern::{match_filename, parse_pattern};
use tracing::{debug, warn};

use crate::content::FileNameContent;
use crate::sequence::Sequence;
use crate::settings::DiscoverySettings;
use crate::walk::{FileSource, listing_dir};
use crate::Error;

/// Files found for a pattern: frame, then view, then absolute filename.
///
/// Patterns without a frame variable file everything under frame 0, and
/// patterns without a view variable use the `None` view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceFromPattern {
    frames: BTreeMap<u64, BTreeMap<Option<u32>, String>>,
}

impl SequenceFromPattern {
    /// Record `filename` for `frame`/`view`. The first file for a pair wins.
    pub fn insert(&mut self, frame: u64, view: Option<u32>, filename: String) -> bool {
        match self.frames.entry(frame).or_default().entry(view) {
            Entry::Vacant(slot) => {
                slot.insert(filename);
                true
            }
            Entry::Occupied(existing) => {
                warn!(
                    frame,
                    ?view,
                    kept = existing.get().as_str(),
                    ignored = filename.as_str(),
                    "two files for the same frame and view"
                );
                false
            }
        }
    }

    pub fn get(&self, frame: u64, view: Option<u32>) -> Option<&str> {
        self.frames.get(&frame)?.get(&view).map(String::as_str)
    }

    pub fn frames(&self) -> &BTreeMap<u64, BTreeMap<Option<u32>, String>> {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of files, all views counted.
    pub fn len(&self) -> usize {
        self.frames.values().map(BTreeMap::len).sum()
    }

    pub fn first_frame(&self) -> Option<u64> {
        self.frames.keys().next().copied()
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.frames.keys().next_back().copied()
    }

    /// Filenames in frame order. With `only_view`, files of other views are
    /// skipped; files without a view are always kept.
    pub fn files(&self, only_view: Option<u32>) -> Vec<&str> {
        self.frames
            .values()
            .flat_map(|views| views.iter())
            .filter(|(view, _)| match (only_view, view) {
                (Some(wanted), Some(v)) => wanted == *v,
                _ => true,
            })
            .map(|(_, file)| file.as_str())
            .collect()
    }
}

/// Every file in the pattern's directory that matches the pattern.
pub fn files_from_pattern<S: FileSource + ?Sized>(
    source: &S,
    pattern: &str,
) -> Result<SequenceFromPattern, Error> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }
    let parsed = parse_pattern(pattern)?;

    let mut found = SequenceFromPattern::default();
    for name in source.list_files(listing_dir(&parsed.path))? {
        let Some(m) = match_filename(&name, &parsed) else {
            continue;
        };
        found.insert(m.frame.unwrap_or(0), m.view, format!("{}{name}", parsed.path));
    }

    debug!(pattern, files = found.len(), "pattern discovery done");
    Ok(found)
}

/// The sequence `absolute` belongs to, found among its directory siblings.
///
/// The result always holds at least the seed file, even when nothing else
/// matches it.
pub fn sequence_from_file<S: FileSource + ?Sized>(
    source: &S,
    absolute: &str,
    settings: DiscoverySettings,
) -> Result<Sequence, Error> {
    let seed = FileNameContent::new(absolute);
    let mut sequence = Sequence::new(settings);
    sequence.try_insert_measured(&seed, source);

    for name in source.list_files(listing_dir(seed.path()))? {
        let candidate = FileNameContent::new(format!("{}{name}", seed.path()));
        sequence.try_insert_measured(&candidate, source);
    }

    debug!(seed = absolute, members = sequence.len(), "file discovery done");
    Ok(sequence)
}

/// Group every file of `dir` into sequences.
///
/// Names are taken in sorted order and offered to the sequences found so far,
/// oldest first; a name nobody accepts starts a new sequence. Lone files come
/// back as one-member sequences.
pub fn sequences_in_directory<S: FileSource + ?Sized>(
    source: &S,
    dir: &str,
    settings: DiscoverySettings,
) -> Result<Vec<Sequence>, Error> {
    let mut prefix = dir.to_string();
    if !prefix.is_empty() && !prefix.ends_with(['/', '\\']) {
        prefix.push('/');
    }

    let mut sequences: Vec<Sequence> = Vec::new();
    for name in source.list_files(listing_dir(&prefix))? {
        let file = FileNameContent::new(format!("{prefix}{name}"));
        if sequences
            .iter_mut()
            .any(|seq| seq.try_insert_measured(&file, source))
        {
            continue;
        }
        let mut seq = Sequence::new(settings);
        seq.try_insert_measured(&file, source);
        sequences.push(seq);
    }

    debug!(dir, sequences = sequences.len(), "directory discovery done");
    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::sequence::PatternStyle;

    /// Directory listing held in memory; sizes are the name lengths.
    struct Listing(Vec<&'static str>);

    impl FileSource for Listing {
        fn list_files(&self, _dir: &Path) -> Result<Vec<String>, Error> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }

        fn file_size(&self, path: &Path) -> Option<u64> {
            path.file_name().map(|n| n.len() as u64)
        }
    }

    struct Missing;

    impl FileSource for Missing {
        fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error> {
            Err(Error::DirectoryUnavailable {
                path: dir.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn file_size(&self, _path: &Path) -> Option<u64> {
            None
        }
    }

    #[test]
    fn pattern_discovery_indexes_frames_and_views() {
        let src = Listing(vec![
            "shot_l.0001.exr",
            "shot_r.0001.exr",
            "shot_l.0002.exr",
            "shot_r.0003.exr",
            "shot_x.0001.exr",
            "notes.txt",
        ]);
        let found = files_from_pattern(&src, "/r/shot_%v.####.exr").unwrap();

        assert_eq!(found.len(), 4);
        assert_eq!(found.first_frame(), Some(1));
        assert_eq!(found.last_frame(), Some(3));
        assert_eq!(found.get(1, Some(1)), Some("/r/shot_r.0001.exr"));
        assert_eq!(
            found.files(Some(0)),
            vec!["/r/shot_l.0001.exr", "/r/shot_l.0002.exr"]
        );
        assert_eq!(found.files(None).len(), 4);
    }

    #[test]
    fn frameless_pattern_uses_frame_zero() {
        let src = Listing(vec!["plate_left.exr", "plate_right.exr", "plate.exr"]);
        let found = files_from_pattern(&src, "plate_%V.exr").unwrap();
        assert_eq!(found.frames().keys().collect::<Vec<_>>(), vec![&0]);
        assert_eq!(found.get(0, Some(0)), Some("plate_left.exr"));
        assert_eq!(found.get(0, Some(1)), Some("plate_right.exr"));
    }

    #[test]
    fn viewless_entries_survive_the_view_filter() {
        let mut found = SequenceFromPattern::default();
        found.insert(1, None, "a".into());
        found.insert(2, Some(1), "b".into());
        found.insert(3, Some(0), "c".into());
        assert_eq!(found.files(Some(0)), vec!["a", "c"]);
    }

    #[test]
    fn first_file_for_a_frame_wins() {
        // 0001 and 1 are both frame 1 under %d
        let src = Listing(vec!["f0001.png", "f1.png"]);
        let found = files_from_pattern(&src, "f%d.png").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.get(1, None), Some("f0001.png"));
    }

    #[test]
    fn empty_pattern_is_an_error() {
        let src = Listing(vec![]);
        assert!(matches!(
            files_from_pattern(&src, ""),
            Err(Error::EmptyPattern)
        ));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let src = Listing(vec![]);
        assert!(matches!(
            files_from_pattern(&src, "a%0%d.png"),
            Err(Error::Pattern(_))
        ));
    }

    #[test]
    fn unavailable_directory_is_an_error() {
        assert!(matches!(
            files_from_pattern(&Missing, "/nope/a_####.png"),
            Err(Error::DirectoryUnavailable { .. })
        ));
        assert!(sequence_from_file(&Missing, "/nope/a_0001.png", DiscoverySettings::default()).is_err());
    }

    #[test]
    fn sequence_around_a_seed() {
        let src = Listing(vec![
            "shotA_0001.png",
            "shotA_0002.png",
            "shotA_0004.png",
            "shotA_5.png",
            "shotB_0001.png",
        ]);
        let seq = sequence_from_file(&src, "/s/shotA_0002.png", DiscoverySettings::default()).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.render(PatternStyle::Canonical), "/s/shotA_####.png");
        assert_eq!(seq.render(PatternStyle::UserFriendly), "shotA_####.png 1-2 / 4");
    }

    #[test]
    fn sizes_are_summed_only_when_asked() {
        let src = Listing(vec!["a_01.png", "a_02.png"]);
        let seq = sequence_from_file(&src, "a_01.png", DiscoverySettings::default()).unwrap();
        assert_eq!(seq.estimated_total_size(), 0);

        let settings = DiscoverySettings {
            estimate_size: true,
            ..DiscoverySettings::default()
        };
        let seq = sequence_from_file(&src, "a_01.png", settings).unwrap();
        assert_eq!(seq.estimated_total_size(), 16);
    }

    #[test]
    fn directory_grouping_is_greedy() {
        let src = Listing(vec![
            "a_0001.png",
            "a_0002.png",
            "b_01.exr",
            "b_02.exr",
            "b_03.exr",
            "readme.txt",
        ]);
        let seqs = sequences_in_directory(&src, "/d", DiscoverySettings::default()).unwrap();
        let rendered: Vec<_> = seqs
            .iter()
            .map(|s| s.render(PatternStyle::UserFriendly))
            .collect();
        assert_eq!(rendered, vec!["a_####.png 1-2", "b_##.exr 1-3", "readme.txt"]);
        assert_eq!(seqs[0].path(), Some("/d/"));
    }
}
