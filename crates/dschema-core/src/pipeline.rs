//! End-to-end processing: text pass, table pass, validation, compilation.
//!
//! The single-document and batch flows share one pipeline and differ only
//! in their [`Profile`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::batch::BatchReconciler;
use crate::breaks::BreakBuilder;
use crate::error::{BatchError, DocumentFailure, DschemaError, Result, ValidationError};
use crate::extract::HeaderExtractor;
use crate::models::{
    Customer, DiscountSchema, Document, DraftDocument, DschemaConfig, Profile, SelectionMode,
};
use crate::tables::{BlockSummary, RowIssue, Table, TableOutcome, TableParser};
use crate::validate::Validator;

/// Text and tables handed over by the document extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Source file name, used as a last-resort SKU hint.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            name: None,
            text: text.into(),
            tables,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Load an extraction JSON file. A missing `name` becomes the file name.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut source: Self = serde_json::from_str(&content)
            .map_err(|e| DschemaError::Config(format!("{}: {}", path.display(), e)))?;
        if source.name.is_none() {
            source.name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        }
        Ok(source)
    }

    fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("document {}", index + 1))
    }
}

/// A validated document with everything noticed on the way.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: Document,
    pub blocks: Vec<BlockSummary>,
    pub issues: Vec<RowIssue>,
    /// Defaults applied by the validator.
    pub warnings: Vec<String>,
}

/// A compiled document.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub document: Document,
    pub schema: DiscountSchema,
    pub issues: Vec<RowIssue>,
    pub warnings: Vec<String>,
}

/// Extraction and compilation under one profile.
pub struct Pipeline<'a> {
    config: &'a DschemaConfig,
    profile: Profile,
}

impl<'a> Pipeline<'a> {
    /// Pipeline of the single-document flow.
    pub fn single(config: &'a DschemaConfig) -> Self {
        Self {
            config,
            profile: config.single,
        }
    }

    /// Pipeline of the batch flow.
    pub fn batch(config: &'a DschemaConfig) -> Self {
        Self {
            config,
            profile: config.batch,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Run the text and table passes without validating.
    pub fn draft(&self, source: &SourceDocument) -> TableOutcome {
        let draft = DraftDocument::new(source.name.clone());
        let draft = HeaderExtractor::new(self.config).extract(&source.text, draft);
        TableParser::new(self.config).parse(&source.tables, draft)
    }

    /// Extract and validate one document.
    pub fn process(&self, source: &SourceDocument) -> std::result::Result<ParseOutcome, ValidationError> {
        info!(
            "Processing {} ({} chars, {} table(s))",
            source.name.as_deref().unwrap_or("document"),
            source.text.len(),
            source.tables.len()
        );

        let TableOutcome {
            draft,
            blocks,
            issues,
        } = self.draft(source);

        let mut warnings = Vec::new();
        let document = Validator::new(self.config)
            .with_policy(self.profile.validation)
            .validate(draft, &mut warnings)?;

        Ok(ParseOutcome {
            document,
            blocks,
            issues,
            warnings,
        })
    }

    /// Build the schema of a validated document.
    pub fn compile(&self, document: &Document, customers: &[Customer]) -> DiscountSchema {
        BreakBuilder::new(self.config)
            .with_sequencing(self.profile.sequencing)
            .build(document, customers)
    }
}

/// Process and compile one document on its own.
///
/// The document's own outlets, if any, become its selected customers.
pub fn process_single(config: &DschemaConfig, source: &SourceDocument) -> Result<Compiled> {
    let pipeline = Pipeline::single(config);
    let ParseOutcome {
        mut document,
        issues,
        warnings,
        ..
    } = pipeline.process(source)?;

    document.selection_mode = if document.outlets.is_empty() {
        SelectionMode::IndividualAllocation
    } else {
        SelectionMode::IndividualSelectedCustomers
    };
    let customers: Vec<Customer> = document.outlets.iter().map(Customer::from).collect();

    let schema = pipeline.compile(&document, &customers);
    Ok(Compiled {
        document,
        schema,
        issues,
        warnings,
    })
}

/// Process a batch. Either every document compiles or none does.
pub fn process_batch(
    config: &DschemaConfig,
    sources: &[SourceDocument],
) -> std::result::Result<Vec<Compiled>, BatchError> {
    let pipeline = Pipeline::batch(config);

    let mut parsed = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        match pipeline.process(source) {
            Ok(outcome) => parsed.push(outcome),
            Err(error) => failures.push(DocumentFailure {
                source: source.label(index),
                error,
            }),
        }
    }
    if !failures.is_empty() {
        return Err(BatchError::DocumentsFailed { failures });
    }

    let mut documents: Vec<Document> = parsed.iter().map(|p| p.document.clone()).collect();
    let customers = BatchReconciler::new().reconcile(&mut documents)?;

    let compiled = documents
        .into_iter()
        .zip(parsed)
        .map(|(document, outcome)| {
            debug!(
                "Compiling {} as {}",
                document.identifier,
                document.selection_mode.code()
            );
            let schema = pipeline.compile(&document, &customers);
            Compiled {
                document,
                schema,
                issues: outcome.issues,
                warnings: outcome.warnings,
            }
        })
        .collect();

    Ok(compiled)
}
