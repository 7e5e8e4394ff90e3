use crate::models::{CellValue, Feature, ShapedTable, FEATURE_COUNT, schema_columns};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur at the model boundary
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model could not be loaded from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("{0}")]
    Prediction(String),

    #[error("Failed to write model artifact: {0}")]
    Save(#[from] std::io::Error),

    #[error("Failed to encode model artifact: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A trained regressor treated as a black box
pub trait Predictor: Send + Sync {
    /// Short description used in logs and the health endpoint
    fn name(&self) -> String;

    /// One output per input row, in row order
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, ModelError>;
}

/// Serialized model file, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
}

impl ModelArtifact {
    /// Read an artifact from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let load_err = |reason: String| ModelError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| load_err(e.to_string()))?;
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))?;
        artifact.check().map_err(load_err)?;
        Ok(artifact)
    }

    /// Write the artifact as pretty JSON, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), "Model artifact saved");
        Ok(())
    }

    fn check(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Linear(model) => model.check(),
        }
    }

    fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            ModelArtifact::Linear(model) => Box::new(model),
        }
    }
}

/// Ordinary linear regression: `intercept + sum(coef_i * x_i)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// Column names the model was fitted on, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl LinearModel {
    fn check(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model parameters must be finite numbers".to_string());
        }
        if let Some(features) = &self.features {
            if features.iter().map(String::as_str).ne(schema_columns()) {
                return Err(format!(
                    "model was fitted on columns [{}], which differ from the expected schema",
                    features.join(", ")
                ));
            }
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn name(&self) -> String {
        format!("linear({} features)", self.coefficients.len())
    }

    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, ModelError> {
        Ok(rows
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, c)| x * c)
                        .sum::<f64>()
            })
            .collect())
    }
}

/// Boundary around the loaded predictor
///
/// Built once at startup and shared read-only for the process lifetime.
pub struct ModelGateway {
    predictor: Box<dyn Predictor>,
    source: PathBuf,
}

impl ModelGateway {
    /// Load the artifact at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading model artifact");

        let predictor = ModelArtifact::read(path)?.into_predictor();

        tracing::info!(model = %predictor.name(), "Model loaded successfully");

        Ok(Self {
            predictor,
            source: path.to_path_buf(),
        })
    }

    /// Wrap an already constructed predictor
    pub fn from_predictor(predictor: Box<dyn Predictor>) -> Self {
        Self {
            predictor,
            source: PathBuf::new(),
        }
    }

    pub fn model_name(&self) -> String {
        self.predictor.name()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Predict a price for every row of a shaped table
    ///
    /// Non-numeric cells and non-finite outputs fail the whole call.
    pub fn predict(&self, table: &ShapedTable) -> Result<Vec<f64>, ModelError> {
        if table.is_empty() {
            return Err(ModelError::Prediction(
                "Found array with 0 sample(s); at least 1 row is required".to_string(),
            ));
        }

        let mut matrix = Vec::with_capacity(table.len());
        for (row_idx, row) in table.rows().iter().enumerate() {
            let mut features = [0.0; FEATURE_COUNT];
            for feature in Feature::ALL {
                features[feature.index()] = numeric_cell(row.get(feature), feature, row_idx)?;
            }
            matrix.push(features);
        }

        let predictions = self.predictor.predict(&matrix)?;

        if predictions.len() != matrix.len() {
            return Err(ModelError::Prediction(format!(
                "model returned {} predictions for {} rows",
                predictions.len(),
                matrix.len()
            )));
        }
        if let Some(idx) = predictions.iter().position(|p| !p.is_finite()) {
            return Err(ModelError::Prediction(format!(
                "model produced a non-finite prediction for row {}",
                idx + 1
            )));
        }

        Ok(predictions)
    }
}

fn numeric_cell(cell: &CellValue, feature: Feature, row_idx: usize) -> Result<f64, ModelError> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Ok(*n),
        CellValue::Number(_) => Err(ModelError::Prediction(format!(
            "Input contains NaN or infinity in column '{}' (row {})",
            feature,
            row_idx + 1
        ))),
        CellValue::Text(s) => Err(ModelError::Prediction(format!(
            "could not convert string to float: '{}' in column '{}' (row {})",
            s,
            feature,
            row_idx + 1
        ))),
        CellValue::Empty => Err(ModelError::Prediction(format!(
            "Input contains a missing value in column '{}' (row {})",
            feature,
            row_idx + 1
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{shape_manual, shape_table};
    use crate::models::{ManualEntryRequest, RawTable};
    use tempfile::tempdir;

    fn unit_model() -> LinearModel {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[Feature::LivingArea.index()] = 100.0;
        coefficients[Feature::Bedrooms.index()] = 1000.0;
        LinearModel {
            intercept: 50.0,
            coefficients,
            features: None,
        }
    }

    #[test]
    fn test_linear_predict_defaults() {
        let gateway = ModelGateway::from_predictor(Box::new(unit_model()));
        let prices = gateway.predict(&shape_manual(&ManualEntryRequest::default())).unwrap();
        // 50 + 3 * 1000 + 1500 * 100
        assert_eq!(prices, vec![153050.0]);
    }

    #[test]
    fn test_text_cell_is_prediction_failure() {
        let gateway = ModelGateway::from_predictor(Box::new(unit_model()));
        let mut row = vec![CellValue::Number(1.0); FEATURE_COUNT];
        row[Feature::BuiltYear.index()] = CellValue::Text("nineteen".to_string());
        let raw = RawTable::new(
            schema_columns().into_iter().map(String::from).collect(),
            vec![row],
        );
        let err = gateway.predict(&shape_table(&raw).unwrap()).unwrap_err();
        assert!(matches!(err, ModelError::Prediction(_)));
        assert!(err.to_string().contains("'nineteen'"));
        assert!(err.to_string().contains("Built Year"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        ModelArtifact::Linear(unit_model()).save(&path).unwrap();

        let gateway = ModelGateway::load(&path).unwrap();
        assert_eq!(gateway.source(), path.as_path());
        assert_eq!(gateway.model_name(), "linear(13 features)");
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempdir().unwrap();
        let err = ModelGateway::load(dir.path().join("absent.json")).err().unwrap();
        assert!(matches!(err, ModelError::Load { .. }));
    }

    #[test]
    fn test_wrong_coefficient_count_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.json");
        fs::write(&path, r#"{"kind":"linear","intercept":1.0,"coefficients":[1.0,2.0]}"#).unwrap();
        let err = ModelGateway::load(&path).err().unwrap();
        assert!(err.to_string().contains("expected 13 coefficients"));
    }

    #[test]
    fn test_mismatched_feature_names_rejected() {
        let mut model = unit_model();
        let mut names: Vec<String> = schema_columns().into_iter().map(String::from).collect();
        names.swap(0, 1);
        model.features = Some(names);
        assert!(model.check().is_err());
    }

    #[test]
    fn test_short_upload_row_fails_without_panic() {
        let gateway = ModelGateway::from_predictor(Box::new(unit_model()));
        let raw = RawTable::new(
            schema_columns().into_iter().map(String::from).collect(),
            vec![vec![CellValue::Number(1.0)]],
        );
        let shaped = shape_table(&raw).unwrap();
        assert_eq!(shaped.rows()[0].values().len(), FEATURE_COUNT);

        let err = gateway.predict(&shaped).unwrap_err();
        assert!(matches!(err, ModelError::Prediction(_)));
        assert!(err.to_string().contains("number of bathrooms"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let gateway = ModelGateway::from_predictor(Box::new(unit_model()));
        let raw = RawTable::new(schema_columns().into_iter().map(String::from).collect(), vec![]);
        assert!(gateway.predict(&shape_table(&raw).unwrap()).is_err());
    }
}
