use std::{fmt::Display, num::ParseIntError, str::FromStr};

use snafu::{OptionExt, ResultExt, Snafu, ensure};

#[cfg(feature = "serde")]
mod serde;

/// Error variants which can be encountered when creating a new [`Path`] from
/// unparsed input.
#[derive(Debug, PartialEq, Snafu)]
pub enum ParsePathError {
    #[snafu(display("path {input:?} contains an empty field name"))]
    EmptyName { input: String },

    #[snafu(display("path {input:?} contains an index without closing bracket"))]
    UnclosedIndex { input: String },

    #[snafu(display("failed to parse {index:?} as array index"))]
    ParseIndex {
        source: ParseIntError,
        index: String,
    },

    #[snafu(display("path {input:?} contains unexpected characters after an index"))]
    TrailingCharacters { input: String },
}

/// A single element of a [`Path`].
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    /// A map key, for example `spec` or `controlPlaneEndpoint`.
    Name(String),

    /// An array index, rendered as `[<INDEX>]`.
    Index(usize),
}

impl Segment {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Index(_) => None,
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<&String> for Segment {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A structured address of a field inside a document tree, for example
/// `spec.template.spec.version` or `spec.items[0].name`.
///
/// The empty path denotes the document root. Paths are never modified in
/// place, [`Path::append`] returns a new path instead.
///
/// Equality is segment-wise, which means `a.b` (two name segments) is not
/// equal to a single segment named `a.b`, even though both render to the same
/// string.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Returns the empty path, which addresses the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` added to the end.
    pub fn append(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment.into());

        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Segment> {
        self.0.first()
    }

    /// Returns the path without its last segment, or [`None`] for the root.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, parent)| Self(parent.to_vec()))
    }

    /// Returns true if `self` is a strict prefix of `other`.
    pub fn is_parent_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Returns true if the paths are equal or one is a parent of the other.
    ///
    /// The root path overlaps every path.
    pub fn overlaps(&self, other: &Self) -> bool {
        self == other || self.is_parent_of(other) || other.is_parent_of(self)
    }
}

impl<S> FromIterator<S> for Path
where
    S: Into<Segment>,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Name(_)) {
                f.write_str(".")?;
            }

            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

impl FromStr for Path {
    type Err = ParsePathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();

        for (position, part) in input.split('.').enumerate() {
            let (name, mut indices) = part.split_at(part.find('[').unwrap_or(part.len()));

            // Only the very first part may start with an index, which addresses
            // an element of a root-level array.
            if name.is_empty() {
                ensure!(position == 0 && !indices.is_empty(), EmptyNameSnafu { input });
            } else {
                segments.push(Segment::Name(name.to_owned()));
            }

            while !indices.is_empty() {
                let tail = indices
                    .strip_prefix('[')
                    .context(TrailingCharactersSnafu { input })?;
                let (index, remainder) = tail
                    .split_once(']')
                    .context(UnclosedIndexSnafu { input })?;
                let index = index.parse::<usize>().context(ParseIndexSnafu { index })?;

                segments.push(Segment::Index(index));
                indices = remainder;
            }
        }

        Ok(Self(segments))
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    fn path(input: &str) -> Path {
        Path::from_str(input).expect("test path is valid")
    }

    #[test]
    fn append_does_not_modify_original() {
        let spec = Path::root().append("spec");
        let replicas = spec.append("replicas");

        assert_eq!(spec.len(), 1);
        assert_eq!(replicas.len(), 2);
        assert_eq!(replicas.parent(), Some(spec));
    }

    #[rstest]
    #[case(Path::root(), "")]
    #[case(Path::from_iter(["spec"]), "spec")]
    #[case(Path::from_iter(["metadata", "labels"]), "metadata.labels")]
    #[case(
        Path::root().append("spec").append("items").append(Segment::Index(0)).append("name"),
        "spec.items[0].name"
    )]
    #[case(
        Path::root().append("spec").append("matrix").append(Segment::Index(1)).append(Segment::Index(12)),
        "spec.matrix[1][12]"
    )]
    #[case(Path::root().append(Segment::Index(3)).append("a"), "[3].a")]
    fn display(#[case] input: Path, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }

    #[rstest]
    #[case("", Path::root())]
    #[case("spec", Path::from_iter(["spec"]))]
    #[case("spec.template.spec.version", Path::from_iter(["spec", "template", "spec", "version"]))]
    #[case(
        "spec.template.containers[0].image",
        Path::root().append("spec").append("template").append("containers").append(Segment::Index(0)).append("image")
    )]
    #[case("spec.matrix[1][12]", Path::root().append("spec").append("matrix").append(Segment::Index(1)).append(Segment::Index(12)))]
    #[case("[3].a", Path::root().append(Segment::Index(3)).append("a"))]
    fn valid_path(#[case] input: &str, #[case] expected: Path) {
        let parsed = Path::from_str(input).expect("valid path");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("spec..replicas", ParsePathError::EmptyName { input: "spec..replicas".to_owned() })]
    #[case(".spec", ParsePathError::EmptyName { input: ".spec".to_owned() })]
    #[case("spec.", ParsePathError::EmptyName { input: "spec.".to_owned() })]
    #[case("spec.[0]", ParsePathError::EmptyName { input: "spec.[0]".to_owned() })]
    #[case("spec.items[0", ParsePathError::UnclosedIndex { input: "spec.items[0".to_owned() })]
    #[case("spec.items[0]name", ParsePathError::TrailingCharacters { input: "spec.items[0]name".to_owned() })]
    fn invalid_path(#[case] input: &str, #[case] error: ParsePathError) {
        let err = Path::from_str(input).expect_err("invalid path");
        assert_eq!(err, error);
    }

    #[rstest]
    #[case("spec.items[x]")]
    #[case("spec.items[-1]")]
    #[case("spec.items[]")]
    fn invalid_index(#[case] input: &str) {
        let err = Path::from_str(input).expect_err("invalid index");
        assert!(matches!(err, ParsePathError::ParseIndex { .. }), "{err:?}");
    }

    #[test]
    fn equality_is_segment_wise() {
        let dotted = Path::root().append("a.b");
        let nested = Path::from_iter(["a", "b"]);

        assert_eq!(dotted.to_string(), nested.to_string());
        assert_ne!(dotted, nested);
        assert_ne!(Path::root().append("0"), Path::root().append(Segment::Index(0)));
    }

    #[rstest]
    #[case("metadata", "metadata.labels", true)]
    #[case("", "metadata", true)]
    #[case("spec", "spec.template.spec.version", true)]
    #[case("spec.items", "spec.items[0]", true)]
    #[case("metadata.labels", "metadata.labels", false)]
    #[case("metadata.labels", "metadata", false)]
    #[case("metadata", "metadataX.labels", false)]
    #[case("spec.foo", "spec.bar.foo", false)]
    #[case("", "", false)]
    fn is_parent_of(#[case] parent: &str, #[case] child: &str, #[case] expected: bool) {
        assert_eq!(path(parent).is_parent_of(&path(child)), expected);
    }

    #[rstest]
    #[case("metadata.labels", "metadata.labels", true)]
    #[case("metadata", "metadata.labels", true)]
    #[case("metadata.labels", "metadata", true)]
    #[case("metadata.labels.foo", "metadata.labels", true)]
    #[case("", "spec.replicas", true)]
    #[case("spec.replicas", "", true)]
    #[case("metadata.labels", "metadata.annotations", false)]
    #[case("status", "spec", false)]
    #[case("spec.a.b", "spec.a.c", false)]
    fn overlaps(#[case] lhs: &str, #[case] rhs: &str, #[case] expected: bool) {
        assert_eq!(path(lhs).overlaps(&path(rhs)), expected);
        assert_eq!(path(rhs).overlaps(&path(lhs)), expected);
    }
}
