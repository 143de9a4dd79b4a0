//! File actions on the open drawing.

use super::DocumentError;
use super::storage::{ensure_jvd_extension, load_file, load_files, save_lines};
use crate::draw::ShapeFactory;
use crate::export::{self, ExportFormat, ensure_extension};
use crate::model::DrawingModel;
use log::info;
use std::path::{Path, PathBuf};

/// The open drawing plus the file actions the menu triggers on it.
pub struct Workspace {
    model: DrawingModel,
}

impl Workspace {
    pub fn new(model: DrawingModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &DrawingModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut DrawingModel {
        &mut self.model
    }

    /// Starts a new, empty, untitled drawing.
    pub fn reset(&mut self) {
        self.model.reset();
    }

    /// Replaces the drawing with the contents of `path`.
    ///
    /// The file is parsed before the current drawing is touched, so a bad
    /// file leaves everything as it was.
    pub fn open(&mut self, path: &Path) -> Result<(), DocumentError> {
        let mut factory = ShapeFactory::new();
        let shapes = load_file(&mut factory, path)?;

        self.model.reset();
        *self.model.factory_mut() = factory;
        for shape in shapes {
            self.model.add(shape);
        }
        self.model.set_file_path(Some(path.to_path_buf()));
        self.model.set_changed(false);

        info!("Opened {} ({} shapes)", path.display(), self.model.len());
        Ok(())
    }

    /// Appends the contents of several files to the current drawing.
    ///
    /// The merged drawing has no file of its own and counts as unsaved. If
    /// any file fails to load nothing is added.
    pub fn open_multiple(&mut self, paths: &[PathBuf]) -> Result<(), DocumentError> {
        let shapes = load_files(self.model.factory_mut(), paths.iter().map(PathBuf::as_path))?;

        let added = shapes.len();
        for shape in shapes {
            self.model.add(shape);
        }
        self.model.set_file_path(None);
        self.model.set_changed(true);

        info!("Merged {} files ({} shapes)", paths.len(), added);
        Ok(())
    }

    /// Writes the drawing to its file.
    ///
    /// The path gains a `.jvd` extension if it lacks one. On failure the
    /// drawing stays marked as unsaved.
    pub fn save(&mut self) -> Result<PathBuf, DocumentError> {
        let path = self.model.file_path().ok_or(DocumentError::NoPath)?;
        let path = ensure_jvd_extension(path);
        self.model.set_file_path(Some(path.clone()));

        save_lines(&path, &self.model.serialize())?;
        self.model.set_changed(false);
        Ok(path)
    }

    /// Saves under a new name.
    ///
    /// An existing file is only replaced when `overwrite` is set.
    pub fn save_as(&mut self, path: &Path, overwrite: bool) -> Result<PathBuf, DocumentError> {
        let path = ensure_jvd_extension(path);
        if path.exists() && !overwrite {
            return Err(DocumentError::AlreadyExists { path });
        }
        self.model.set_file_path(Some(path));
        self.save()
    }

    /// Exports the drawing as an image and returns the written path.
    ///
    /// Without an explicit format the path's extension decides, falling back
    /// to `default_format`.
    pub fn export(
        &self,
        path: &Path,
        format: Option<ExportFormat>,
        default_format: ExportFormat,
    ) -> Result<PathBuf, DocumentError> {
        let format = format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or(default_format);
        let path = ensure_extension(path, format);

        export::write_image(&path, format, self.model.shapes()).map_err(|source| {
            DocumentError::Export {
                path: path.clone(),
                source,
            }
        })?;
        Ok(path)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(DrawingModel::default())
    }
}
