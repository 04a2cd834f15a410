//! Aggregation of matching files into one frame sequence.

use std::collections::BTreeMap;

use tracing::trace;

use crate::content::FileNameContent;
use crate::ranges::{FrameRange, format_ranges, frame_ranges};
use crate::settings::DiscoverySettings;
use crate::walk::FileSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternStyle {
    /// Directory plus `#` pattern: `/shots/shotA_####.png`.
    #[default]
    Canonical,
    /// Name pattern plus frame ranges: `shotA_####.png 1-2 / 4`.
    UserFriendly,
}

/// Files accepted into one sequence, keyed by frame number.
///
/// The first file inserted is the reference every later file is compared
/// with. The second accepted file fixes which number runs carry the frame;
/// from then on every file must vary exactly those runs.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    settings: DiscoverySettings,
    members: Vec<FileNameContent>,
    frames: BTreeMap<u64, String>,
    varying: Vec<usize>,
    total_size: u64,
}

enum Admission {
    Seed,
    Member {
        frame: u64,
        /// Set when this is the second member: the runs that carry the frame
        /// and the reference's own frame number.
        established: Option<(Vec<usize>, u64)>,
    },
}

impl Sequence {
    pub fn new(settings: DiscoverySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Add `file` if it belongs to this sequence. Returns whether it was
    /// accepted; a rejected file leaves the sequence untouched.
    pub fn try_insert(&mut self, file: &FileNameContent) -> bool {
        match self.admit(file) {
            Some(admission) => {
                self.record(file, admission);
                true
            }
            None => false,
        }
    }

    /// [`Sequence::try_insert`], also adding the file's size to the running
    /// total when size estimation is on. Files the source cannot measure
    /// count as zero bytes.
    pub fn try_insert_measured<S: FileSource + ?Sized>(
        &mut self,
        file: &FileNameContent,
        source: &S,
    ) -> bool {
        if !self.try_insert(file) {
            return false;
        }
        if self.settings.estimate_size {
            self.total_size += source
                .file_size(std::path::Path::new(file.absolute()))
                .unwrap_or(0);
        }
        true
    }

    fn admit(&self, file: &FileNameContent) -> Option<Admission> {
        let Some(reference) = self.members.first() else {
            return Some(Admission::Seed);
        };

        if file.path() != reference.path() {
            trace!(file = file.absolute(), "rejected: other directory");
            return None;
        }
        if self.contains(file.absolute()) {
            trace!(file = file.absolute(), "rejected: already a member");
            return None;
        }

        let varying = file.matches(reference)?;
        let seeded = self.varying.is_empty();
        if !seeded && varying != self.varying {
            trace!(file = file.absolute(), ?varying, expected = ?self.varying, "rejected: other runs vary");
            return None;
        }
        if !fixed_runs_agree(file, reference, &varying) {
            trace!(file = file.absolute(), "rejected: a non-frame number differs");
            return None;
        }

        let frame = lockstep_frame(file, &varying)?;
        if self.frames.contains_key(&frame) {
            trace!(file = file.absolute(), frame, "rejected: frame already taken");
            return None;
        }

        let established = if seeded {
            let reference_frame = lockstep_frame(reference, &varying)?;
            if reference_frame == frame {
                return None;
            }
            Some((varying, reference_frame))
        } else {
            None
        };

        Some(Admission::Member { frame, established })
    }

    fn record(&mut self, file: &FileNameContent, admission: Admission) {
        if let Admission::Member { frame, established } = admission {
            if let Some((varying, reference_frame)) = established {
                if let Some(reference) = self.members.first() {
                    self.frames
                        .insert(reference_frame, reference.absolute().to_string());
                }
                self.varying = varying;
            }
            self.frames.insert(frame, file.absolute().to_string());
        }
        self.members.push(file.clone());
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn contains(&self, absolute: &str) -> bool {
        self.members.iter().any(|m| m.absolute() == absolute)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_single_file(&self) -> bool {
        self.members.len() == 1
    }

    pub fn reference(&self) -> Option<&FileNameContent> {
        self.members.first()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[FileNameContent] {
        &self.members
    }

    /// Absolute filenames in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(FileNameContent::absolute)
    }

    /// Frame number to absolute filename, ascending.
    pub fn frame_indexes(&self) -> &BTreeMap<u64, String> {
        &self.frames
    }

    /// Indexes of the number runs that carry the frame. Empty until a second
    /// file has been accepted.
    pub fn varying_runs(&self) -> &[usize] {
        &self.varying
    }

    pub fn first_frame(&self) -> Option<u64> {
        self.frames.keys().next().copied()
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.frames.keys().next_back().copied()
    }

    pub fn ranges(&self) -> Vec<FrameRange> {
        frame_ranges(self.frames.keys().copied(), self.settings.max_gap)
    }

    pub fn path(&self) -> Option<&str> {
        self.reference().map(FileNameContent::path)
    }

    pub fn extension(&self) -> Option<&str> {
        self.reference().and_then(FileNameContent::extension)
    }

    /// Sum of member sizes; stays zero unless size estimation is on.
    pub fn estimated_total_size(&self) -> u64 {
        self.total_size
    }

    /// Describe the sequence as a single string.
    ///
    /// An empty sequence renders as `""` and a lone file as its own name in
    /// either style.
    pub fn render(&self, style: PatternStyle) -> String {
        let Some(reference) = self.reference() else {
            return String::new();
        };

        match style {
            PatternStyle::Canonical => {
                if self.is_single_file() {
                    return reference.absolute().to_string();
                }
                reference
                    .pattern_with_frame_at(&self.varying)
                    .unwrap_or_else(|| reference.absolute().to_string())
            }
            PatternStyle::UserFriendly => {
                if self.is_single_file() {
                    return reference.name().to_string();
                }
                let pattern = reference
                    .pattern_with_frame_at(&self.varying)
                    .unwrap_or_else(|| reference.absolute().to_string());
                let name = &pattern[reference.path().len()..];
                format!("{name} {}", format_ranges(&self.ranges()))
            }
        }
    }
}

fn fixed_runs_agree(file: &FileNameContent, reference: &FileNameContent, varying: &[usize]) -> bool {
    (0..reference.number_count())
        .filter(|i| !varying.contains(i))
        .all(|i| file.number_at(i) == reference.number_at(i))
}

/// The frame number of `file`, provided every varying run holds the same value.
fn lockstep_frame(file: &FileNameContent, varying: &[usize]) -> Option<u64> {
    let mut frame = None;
    for &run in varying {
        let value = file.number_at(run)?.parse::<u64>().ok()?;
        match frame {
            None => frame = Some(value),
            Some(f) if f != value => return None,
            Some(_) => {}
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::decompose;

    fn sequence_of(files: &[&str]) -> (Sequence, Vec<bool>) {
        let mut seq = Sequence::new(DiscoverySettings::default());
        let accepted = files.iter().map(|f| seq.try_insert(&decompose(f))).collect();
        (seq, accepted)
    }

    #[test]
    fn empty_sequence() {
        let seq = Sequence::new(DiscoverySettings::default());
        assert!(seq.is_empty());
        assert_eq!(seq.first_frame(), None);
        assert_eq!(seq.last_frame(), None);
        assert_eq!(seq.render(PatternStyle::Canonical), "");
        assert_eq!(seq.render(PatternStyle::UserFriendly), "");
    }

    #[test]
    fn lone_file_renders_as_itself() {
        let (seq, accepted) = sequence_of(&["/s/shotA_0001.png"]);
        assert_eq!(accepted, vec![true]);
        assert!(seq.is_single_file());
        assert!(seq.frame_indexes().is_empty());
        assert_eq!(seq.render(PatternStyle::Canonical), "/s/shotA_0001.png");
        assert_eq!(seq.render(PatternStyle::UserFriendly), "shotA_0001.png");
    }

    #[test]
    fn shot_with_a_hole() {
        let (seq, accepted) = sequence_of(&[
            "/s/shotA_0001.png",
            "/s/shotA_0002.png",
            "/s/shotA_0004.png",
            "/s/shotB_0001.png",
        ]);
        assert_eq!(accepted, vec![true, true, true, false]);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.varying_runs(), &[0]);
        assert_eq!(seq.first_frame(), Some(1));
        assert_eq!(seq.last_frame(), Some(4));
        assert_eq!(seq.render(PatternStyle::Canonical), "/s/shotA_####.png");
        assert_eq!(seq.render(PatternStyle::UserFriendly), "shotA_####.png 1-2 / 4");
    }

    #[test]
    fn second_member_keys_the_reference_too() {
        let (seq, _) = sequence_of(&["/s/a_0005.png", "/s/a_0003.png"]);
        let frames: Vec<_> = seq.frame_indexes().iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(frames, vec![(3, "/s/a_0003.png"), (5, "/s/a_0005.png")]);
        assert_eq!(seq.files().collect::<Vec<_>>(), vec!["/s/a_0005.png", "/s/a_0003.png"]);
    }

    #[test]
    fn unpadded_frame_in_padded_sequence_is_rejected() {
        let (seq, accepted) = sequence_of(&["/s/shotA_0001.png", "/s/shotA_0002.png", "/s/shotA_5.png"]);
        assert_eq!(accepted, vec![true, true, false]);
        assert!(!seq.contains("/s/shotA_5.png"));
    }

    #[test]
    fn growing_magnitude_is_accepted() {
        let (seq, accepted) = sequence_of(&["/s/f8.png", "/s/f9.png", "/s/f10.png"]);
        assert_eq!(accepted, vec![true, true, true]);
        assert_eq!(seq.render(PatternStyle::UserFriendly), "f#.png 8-10");
    }

    #[test]
    fn duplicates_and_other_directories_are_rejected() {
        let (_, accepted) = sequence_of(&["/s/a_01.png", "/s/a_01.png", "/t/a_02.png", "/s/a_02.png"]);
        assert_eq!(accepted, vec![true, false, false, true]);
    }

    #[test]
    fn frame_runs_are_fixed_by_the_second_member() {
        // take 1 -> 1, frame 001 -> 002: run 1 is the frame
        let (seq, accepted) = sequence_of(&[
            "/s/t1_001.png",
            "/s/t1_002.png",
            "/s/t2_003.png",
            "/s/t1_003.png",
        ]);
        assert_eq!(accepted, vec![true, true, false, true]);
        assert_eq!(seq.varying_runs(), &[1]);
        assert_eq!(seq.render(PatternStyle::Canonical), "/s/t1_###.png");
    }

    #[test]
    fn tied_runs_move_in_lockstep() {
        let (seq, accepted) = sequence_of(&["a1_b1.png", "a2_b2.png", "a3_b3.png", "a4_b5.png"]);
        assert_eq!(accepted, vec![true, true, true, false]);
        assert_eq!(seq.varying_runs(), &[0, 1]);
        assert_eq!(seq.render(PatternStyle::UserFriendly), "a#_b#.png 1-3");
    }

    #[test]
    fn large_gap_truncates_summary() {
        let mut seq = Sequence::new(DiscoverySettings {
            max_gap: 10,
            ..DiscoverySettings::default()
        });
        for f in ["s_0001.png", "s_0002.png", "s_0100.png"] {
            assert!(seq.try_insert(&decompose(f)));
        }
        assert_eq!(seq.render(PatternStyle::UserFriendly), "s_####.png 1-2");
        // The canonical form does not summarize frames.
        assert_eq!(seq.render(PatternStyle::Canonical), "s_####.png");
    }

    #[test]
    fn non_frame_run_must_match_the_reference() {
        // a1_0002 varies the frame run, but 01 -> 1 also changes a fixed run
        let (seq, accepted) = sequence_of(&["/s/a01_0001.png", "/s/a01_0002.png", "/s/a1_0002.png"]);
        assert_eq!(accepted, vec![true, true, false]);
        assert_eq!(seq.varying_runs(), &[1]);

        let (seq, accepted) = sequence_of(&["/s/a01_0001.png", "/s/a1_0002.png"]);
        assert_eq!(accepted, vec![true, false]);
        assert!(seq.varying_runs().is_empty());
    }

    /// Sizes are the name lengths, except for `a_2.png`.
    struct PartlyMeasurable;

    impl FileSource for PartlyMeasurable {
        fn list_files(&self, _dir: &std::path::Path) -> Result<Vec<String>, crate::Error> {
            Ok(Vec::new())
        }

        fn file_size(&self, path: &std::path::Path) -> Option<u64> {
            let name = path.file_name()?.to_str()?;
            (name != "a_2.png").then(|| name.len() as u64)
        }
    }

    #[test]
    fn unmeasurable_member_is_still_accepted() {
        let mut seq = Sequence::new(DiscoverySettings {
            estimate_size: true,
            ..DiscoverySettings::default()
        });
        for f in ["a_1.png", "a_2.png", "a_3.png"] {
            assert!(seq.try_insert_measured(&decompose(f), &PartlyMeasurable));
        }
        assert_eq!(seq.len(), 3);
        assert!(seq.contains("a_2.png"));
        assert_eq!(seq.estimated_total_size(), 14);
    }

    #[test]
    fn accessors() {
        let (seq, _) = sequence_of(&["/s/a_01.exr", "/s/a_02.exr"]);
        assert_eq!(seq.path(), Some("/s/"));
        assert_eq!(seq.extension(), Some("exr"));
        assert_eq!(seq.estimated_total_size(), 0);
        assert_eq!(seq.ranges(), vec![FrameRange { first: 1, last: 2 }]);
    }
}
