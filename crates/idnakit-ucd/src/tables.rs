//! The full set of property tables the classifier is derived from

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use idnakit_core::{
    CodePointRange, GeneralCategory, HangulSyllableType, IdnaError, IdnaResult, JoiningType,
    UnicodeFilter,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::composition::{register_hangul, CompositionTable, DecompositionTable};
use crate::map::{Interner, PropertyMap, PropertyMapBuilder};
use crate::record::{invalid_line, records};
use crate::unicode_data::{parse_unicode_data, UNICODE_DATA};

pub const COMPOSITION_EXCLUSIONS: &str = "CompositionExclusions.txt";
pub const SCRIPTS: &str = "Scripts.txt";
pub const PROP_LIST: &str = "PropList.txt";
pub const DERIVED_CORE_PROPERTIES: &str = "DerivedCoreProperties.txt";
pub const DERIVED_NORMALIZATION_PROPS: &str = "DerivedNormalizationProps.txt";
pub const DERIVED_JOINING_TYPE: &str = "DerivedJoiningType.txt";
pub const HANGUL_SYLLABLE_TYPE: &str = "HangulSyllableType.txt";
pub const BLOCKS: &str = "Blocks.txt";

/// Raw contents of the UCD files, one field per file.
#[derive(Clone, Copy, Debug, Default)]
pub struct UcdTexts<'a> {
    pub unicode_data: &'a str,
    pub composition_exclusions: &'a str,
    pub scripts: &'a str,
    pub prop_list: &'a str,
    pub derived_core_properties: &'a str,
    pub derived_normalization_props: &'a str,
    pub derived_joining_type: &'a str,
    pub hangul_syllable_type: &'a str,
    pub blocks: &'a str,
}

/// Owned file contents read from a UCD directory.
#[derive(Clone, Debug, Default)]
pub struct UcdFiles {
    pub unicode_data: String,
    pub composition_exclusions: String,
    pub scripts: String,
    pub prop_list: String,
    pub derived_core_properties: String,
    pub derived_normalization_props: String,
    pub derived_joining_type: String,
    pub hangul_syllable_type: String,
    pub blocks: String,
}

impl UcdFiles {
    pub fn read_dir(dir: &Path) -> IdnaResult<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| IdnaError::Io { path, source })
        };
        Ok(Self {
            unicode_data: read(UNICODE_DATA)?,
            composition_exclusions: read(COMPOSITION_EXCLUSIONS)?,
            scripts: read(SCRIPTS)?,
            prop_list: read(PROP_LIST)?,
            derived_core_properties: read(DERIVED_CORE_PROPERTIES)?,
            derived_normalization_props: read(DERIVED_NORMALIZATION_PROPS)?,
            derived_joining_type: read(DERIVED_JOINING_TYPE)?,
            hangul_syllable_type: read(HANGUL_SYLLABLE_TYPE)?,
            blocks: read(BLOCKS)?,
        })
    }

    pub fn texts(&self) -> UcdTexts<'_> {
        UcdTexts {
            unicode_data: &self.unicode_data,
            composition_exclusions: &self.composition_exclusions,
            scripts: &self.scripts,
            prop_list: &self.prop_list,
            derived_core_properties: &self.derived_core_properties,
            derived_normalization_props: &self.derived_normalization_props,
            derived_joining_type: &self.derived_joining_type,
            hangul_syllable_type: &self.hangul_syllable_type,
            blocks: &self.blocks,
        }
    }
}

/// Quick-check and case folding flags from DerivedNormalizationProps.txt
#[derive(Clone, Debug)]
pub struct NormalizationFlags {
    pub nfc_qc_no: UnicodeFilter,
    pub nfc_qc_maybe: UnicodeFilter,
    pub nfkc_qc_no: UnicodeFilter,
    /// Code points with an NFKC_Casefold mapping
    pub nfkc_casefold: UnicodeFilter,
}

/// Every Unicode property table used to classify code points.
#[derive(Clone, Debug)]
pub struct PropertyTables {
    /// Code points listed in UnicodeData.txt
    pub assigned: UnicodeFilter,
    pub general_category: PropertyMap<GeneralCategory>,
    pub canonical_class: PropertyMap<u8>,
    pub bidi_class: PropertyMap<Arc<str>>,
    pub scripts: PropertyMap<Arc<str>>,
    pub joining_type: PropertyMap<JoiningType>,
    pub blocks: PropertyMap<Arc<str>>,
    pub hangul_syllable_type: PropertyMap<HangulSyllableType>,
    /// Binary properties from PropList.txt and DerivedCoreProperties.txt
    pub binary_properties: FxHashMap<String, UnicodeFilter>,
    pub normalization: NormalizationFlags,
    pub decompositions: DecompositionTable,
    pub compositions: CompositionTable,
}

impl PropertyTables {
    /// Read and parse every table under `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> IdnaResult<Self> {
        let dir = dir.as_ref();
        tracing::debug!("reading UCD files from {}", dir.display());
        let files = UcdFiles::read_dir(dir)?;
        Self::from_texts(&files.texts())
    }

    pub fn from_texts(texts: &UcdTexts<'_>) -> IdnaResult<Self> {
        let started = Instant::now();
        let mut interner = Interner::new();

        let unicode_data = parse_unicode_data(texts.unicode_data, &mut interner)?;
        let assigned = UnicodeFilter::from_ranges("Assigned", unicode_data.assigned)?;
        tracing::debug!(
            ranges = assigned.ranges().len(),
            decompositions = unicode_data.decompositions.len(),
            "parsed {}",
            UNICODE_DATA
        );

        let exclusions = parse_point_set(COMPOSITION_EXCLUSIONS, texts.composition_exclusions)?;
        let mut decompositions = unicode_data.decompositions;
        let mut compositions =
            CompositionTable::build(&decompositions, &exclusions, &unicode_data.canonical_class);
        register_hangul(&mut decompositions, &mut compositions);

        let scripts = parse_named_map(SCRIPTS, texts.scripts, &mut interner)?;
        let blocks = parse_named_map(BLOCKS, texts.blocks, &mut interner)?;
        let joining_type = parse_enum_map(
            DERIVED_JOINING_TYPE,
            texts.derived_joining_type,
            JoiningType::from_abbr,
        )?;
        let hangul_syllable_type = parse_enum_map(
            HANGUL_SYLLABLE_TYPE,
            texts.hangul_syllable_type,
            HangulSyllableType::from_abbr,
        )?;

        let mut binary_properties = FxHashMap::default();
        parse_binary_properties(PROP_LIST, texts.prop_list, &mut binary_properties)?;
        parse_binary_properties(
            DERIVED_CORE_PROPERTIES,
            texts.derived_core_properties,
            &mut binary_properties,
        )?;
        let binary_properties = binary_properties
            .into_iter()
            .map(|(name, ranges)| -> IdnaResult<(String, UnicodeFilter)> {
                let filter = UnicodeFilter::from_ranges(name.clone(), ranges)?;
                Ok((name, filter))
            })
            .collect::<IdnaResult<FxHashMap<_, _>>>()?;

        let normalization = parse_normalization_flags(texts.derived_normalization_props)?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            binary_properties = binary_properties.len(),
            compositions = compositions.len(),
            "loaded Unicode property tables"
        );

        Ok(Self {
            assigned,
            general_category: unicode_data.general_category,
            canonical_class: unicode_data.canonical_class,
            bidi_class: unicode_data.bidi_class,
            scripts,
            joining_type,
            blocks,
            hangul_syllable_type,
            binary_properties,
            normalization,
            decompositions,
            compositions,
        })
    }

    /// True if `cp` has the named binary property. Unknown names are false.
    pub fn has_property(&self, name: &str, cp: u32) -> bool {
        self.binary_properties
            .get(name)
            .map_or(false, |filter| filter.has(cp))
    }

    pub fn block(&self, cp: u32) -> Option<&str> {
        self.blocks.get(cp).map(|b| &**b)
    }
}

fn parse_point_set(source: &str, text: &str) -> IdnaResult<FxHashSet<u32>> {
    let mut set = FxHashSet::default();
    for record in records(source, text) {
        set.extend(record?.range.iter());
    }
    Ok(set)
}

fn parse_named_map(
    source: &str,
    text: &str,
    interner: &mut Interner,
) -> IdnaResult<PropertyMap<Arc<str>>> {
    let mut builder = PropertyMapBuilder::new();
    for record in records(source, text) {
        let record = record?;
        let value = record.require(source, 0)?;
        builder.insert(record.range, interner.intern(value));
    }
    let map = builder.build();
    tracing::debug!(entries = map.len(), "parsed {}", source);
    Ok(map)
}

fn parse_enum_map<V: PartialEq>(
    source: &str,
    text: &str,
    parse: impl Fn(&str) -> Option<V>,
) -> IdnaResult<PropertyMap<V>> {
    let mut builder = PropertyMapBuilder::new();
    for record in records(source, text) {
        let record = record?;
        let value = parse(record.require(source, 0)?)
            .ok_or_else(|| invalid_line(source, record.line_number, record.line))?;
        builder.insert(record.range, value);
    }
    let map = builder.build();
    tracing::debug!(entries = map.len(), "parsed {}", source);
    Ok(map)
}

fn parse_binary_properties(
    source: &str,
    text: &str,
    out: &mut FxHashMap<String, Vec<CodePointRange>>,
) -> IdnaResult<()> {
    for record in records(source, text) {
        let record = record?;
        let name = record.require(source, 0)?;
        out.entry(name.to_string()).or_default().push(record.range);
    }
    Ok(())
}

/// Keep NFC_QC, NFKC_QC and NFKC_CF records, drop the rest.
fn parse_normalization_flags(text: &str) -> IdnaResult<NormalizationFlags> {
    let source = DERIVED_NORMALIZATION_PROPS;
    let mut nfc_qc_no = Vec::new();
    let mut nfc_qc_maybe = Vec::new();
    let mut nfkc_qc_no = Vec::new();
    let mut nfkc_casefold = Vec::new();

    for record in records(source, text) {
        let record = record?;
        match (record.require(source, 0)?, record.field(1).unwrap_or("")) {
            ("NFC_QC", "N") => nfc_qc_no.push(record.range),
            ("NFC_QC", "M") => nfc_qc_maybe.push(record.range),
            ("NFKC_QC", "N") => nfkc_qc_no.push(record.range),
            ("NFKC_CF", _) => nfkc_casefold.push(record.range),
            _ => {}
        }
    }

    Ok(NormalizationFlags {
        nfc_qc_no: UnicodeFilter::from_ranges("NFC_QC=N", nfc_qc_no)?,
        nfc_qc_maybe: UnicodeFilter::from_ranges("NFC_QC=M", nfc_qc_maybe)?,
        nfkc_qc_no: UnicodeFilter::from_ranges("NFKC_QC=N", nfkc_qc_no)?,
        nfkc_casefold: UnicodeFilter::from_ranges("NFKC_CF", nfkc_casefold)?,
    })
}
