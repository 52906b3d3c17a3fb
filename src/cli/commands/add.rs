//! add command - Stage files
//!
//! Each argument is staged on its own; a failing path is reported and the
//! remaining paths are still processed.

use anyhow::Result;

use super::CommandError;
use crate::cli::context::Context;
use crate::ui::output;

/// Argument that stages everything.
const ALL: &str = ".";

/// Stage the given paths.
///
/// # Errors
///
/// - [`CommandError::Usage`] when no path is given (the repository is not
///   opened)
/// - [`CommandError::PartialAdd`] when at least one path failed
pub fn add(ctx: &Context, paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Err(CommandError::Usage {
            message: "追加するファイルを指定してください",
            example: "git-cli add ファイル名",
        }
        .into());
    }

    let git = ctx.open_repo()?;
    let verbosity = ctx.verbosity();
    let mut failed = 0;

    for path in paths {
        let result = if path == ALL {
            git.stage_all()
        } else {
            git.stage(path)
        };

        match result {
            Ok(()) => output::print(format!("ファイルを追加しました: {}", path), verbosity),
            Err(err) => {
                failed += 1;
                output::error(format!(
                    "ファイル '{}' を追加できませんでした: {}",
                    path, err
                ));
            }
        }
    }

    if failed > 0 {
        return Err(CommandError::PartialAdd { failed }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_paths_is_usage_error_without_touching_repo() {
        // The cwd is not a repository; a usage error proves it was never opened.
        let dir = tempfile::TempDir::new().unwrap();
        let ctx = Context {
            cwd: Some(dir.path().to_path_buf()),
            quiet: true,
            ..Default::default()
        };

        let err = add(&ctx, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::Usage { .. })
        ));
    }
}
