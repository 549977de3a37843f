use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use widepatch_core::policy::{MAX_SUPPORTED_RATIO, UI_REFERENCE_RATIO};
use widepatch_core::{
    CompatProfile, PassthroughUnpacker, PatchReport, PatchRequest, PatchSession,
    ReferenceResolution, builtin_profile, load_profile, storage,
};

mod prompt;

/// 21:9 as shipped on 2560x1080 displays; ratios between 16:9 and this one
/// sit between the two supported layouts
const INTERMEDIATE_RATIO: f32 = 2560.0 / 1080.0;
/// Slack for float ratio comparisons
const RATIO_TOLERANCE: f32 = 0.0001;

#[derive(Parser)]
#[command(name = "widepatch")]
#[command(about = "Custom resolution patcher for packed game executables")]
struct Args {
    /// Target executable image
    #[arg(short, long, default_value = "game.exe")]
    exe: PathBuf,

    /// Desired width (prompted for when omitted)
    #[arg(long)]
    width: Option<i32>,

    /// Desired height (prompted for when omitted)
    #[arg(long)]
    height: Option<i32>,

    /// Resolution to replace: menu index (1 = 1280x720, 2 = 1920x1080,
    /// 3 = 3440x1440, 4 = 2560x1440, 5 = 3840x2160) or an exact size like
    /// "3440x1440"
    #[arg(short, long)]
    replace: Option<String>,

    /// Apply the experimental UI rescale for sub-16:9 ratios without asking
    #[arg(long)]
    ui_scale: bool,

    /// Answer every prompt with its default
    #[arg(short = 'y', long)]
    assume_yes: bool,

    /// Compatibility profile JSON (defaults to the builtin table)
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("widepatch=info".parse()?)
                .add_directive("widepatch_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    println!("Welcome to the resolution patcher!\n");

    let profile = load_or_builtin_profile(&args)?;
    let reference = select_reference(&args);

    let (mut width, mut height) = read_resolution(&args, reference)?;

    let ratio = width as f32 / height as f32;
    let mut apply_ui_patch = false;

    if ratio + RATIO_TOLERANCE < UI_REFERENCE_RATIO {
        println!();
        if args.ui_scale
            || (!args.assume_yes
                && prompt::read_bool(
                    "Your desired aspect ratio is below the minimum officially supported \
                     (parts of the UI might not be visible).\n\
                     Apply the EXPERIMENTAL fix to scale down the UI?",
                    false,
                ))
        {
            apply_ui_patch = true;
        } else if !args.assume_yes {
            println!();
            if prompt::read_bool(
                "Find the maximum 16:9 resolution contained by your screen instead?\n\
                 Playing borderless with black bars keeps the UI intact.",
                false,
            ) {
                height = (width as f32 / UI_REFERENCE_RATIO).round() as i32;
            }
        }
    } else if ratio - RATIO_TOLERANCE > UI_REFERENCE_RATIO
        && ratio + RATIO_TOLERANCE < INTERMEDIATE_RATIO
    {
        println!(
            "\nYour aspect ratio sits between the supported 16:9 and 21:9. \
             The UI might not scale or anchor correctly."
        );
    } else if ratio - RATIO_TOLERANCE > MAX_SUPPORTED_RATIO {
        println!(
            "\nYour aspect ratio is above 43:16 (21:9), the officially supported maximum.\n\
             The UI will work but won't scale or anchor perfectly."
        );
    }

    let backup_path = sibling_with_suffix(&args.exe, ".backup.exe");
    if backup_path.exists() {
        println!(
            "\nA backup of {} from the last successful run was found.\n",
            args.exe.display()
        );
        if !args.assume_yes && prompt::read_bool("Restore this backup before patching?", false) {
            storage::backup_copy(&backup_path, &args.exe)?;
            info!("Backup restored");
        }
    }

    if !args.exe.exists() {
        bail!("Could not find {}", args.exe.display());
    }

    println!("\nUnpacking {}...", args.exe.display());

    let raw = storage::read_image(&args.exe)?;
    let mut session = PatchSession::load(raw);
    session.unpack_with(&PassthroughUnpacker)?;

    // Keep the unpacked copy on disk while patching, as the unpacker would
    let temp_path = sibling_with_suffix(&args.exe, ".unpacked.exe");
    storage::write_image_atomic(&temp_path, session.bytes())?;

    println!("\nPatching resolution to {}x{}...", width, height);

    let request = PatchRequest {
        width,
        height,
        reference,
        apply_ui_patch,
    };
    if let Err(e) = session.patch(&request, &profile) {
        storage::remove_temp(&temp_path)?;
        println!(
            "\n{}",
            "Patching failed, consider restoring a backup and trying again.".red()
        );
        return Err(e).context("the original file was left untouched");
    }

    let outcome = session.commit()?;
    if outcome.ui_patch_failed {
        println!(
            "\n{}",
            "UI failed to patch, resolution was patched nonetheless.".yellow()
        );
    }

    println!("\nBacking up {}...", args.exe.display());
    storage::backup_copy(&args.exe, &backup_path)?;

    println!("\nReplacing {}...", args.exe.display());
    storage::write_image_atomic(&args.exe, &outcome.buffer)?;
    storage::remove_temp(&temp_path)?;

    let report = PatchReport::new(
        &args.exe,
        reference,
        width,
        height,
        outcome.ui_patch_failed,
        outcome.patched_offsets,
    );
    report.save(sibling_with_suffix(&args.exe, ".patch.json"))?;

    println!("\n{}", "Done!".green());
    println!(
        "Set the in-game resolution to {} and restart the game. \
         The config file works too.",
        reference
    );
    Ok(())
}

fn load_or_builtin_profile(args: &Args) -> Result<CompatProfile> {
    let profile = match &args.profile {
        Some(path) => load_profile(path)
            .with_context(|| format!("loading profile {}", path.display()))?,
        None => builtin_profile(),
    };
    info!("Using compatibility profile '{}'", profile.version);
    Ok(profile)
}

fn select_reference(args: &Args) -> ReferenceResolution {
    if let Some(input) = &args.replace {
        return parse_reference(input).unwrap_or(ReferenceResolution::R1280x720);
    }
    if args.assume_yes {
        return ReferenceResolution::R1280x720;
    }

    let choice = prompt::read_int(
        "Select the resolution you want to replace.\n\
         1 for 1280x720, 2 for 1920x1080, 3 for 3440x1440 (suggested for ultrawide)",
        1,
    );
    u8::try_from(choice)
        .ok()
        .and_then(ReferenceResolution::from_menu_index)
        .unwrap_or(ReferenceResolution::R1280x720)
}

/// Accept either an exact size like "3440x1440" or a menu index
fn parse_reference(input: &str) -> Option<ReferenceResolution> {
    if let Ok(reference) = input.parse::<ReferenceResolution>() {
        return Some(reference);
    }
    input
        .parse::<u8>()
        .ok()
        .and_then(ReferenceResolution::from_menu_index)
}

fn read_resolution(args: &Args, reference: ReferenceResolution) -> Result<(i32, i32)> {
    let interactive = !args.assume_yes;
    if interactive && (args.width.is_none() || args.height.is_none()) {
        println!("\nPlease enter your desired resolution.\n");
    }

    let width = match args.width {
        Some(w) => w,
        None if interactive => prompt::read_int("Width", reference.width()),
        None => reference.width(),
    };
    let height = match args.height {
        Some(h) => h,
        None if interactive => prompt::read_int("Height", reference.height()),
        None => reference.height(),
    };

    if width <= 0 || height <= 0 {
        bail!("Resolution must be positive, got {}x{}", width, height);
    }
    Ok((width, height))
}

/// `game.exe` -> `game.exe<suffix>` in the same directory
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
