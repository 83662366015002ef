use powerbar_core::{
    event::{self, SegmentRegistration},
    Emitter, Event, Producer, SegmentUpdate,
};
use std::path::{Path, PathBuf};

pub const SEGMENT_ID: &str = "git-branch";

const BRANCH_PREFIX: &str = "ref: refs/heads/";

/// Shows the current git branch (or short hash when detached).
///
/// Re-reads `HEAD` on session start/switch and after every `bash` tool run,
/// since the user may have switched branches.
#[derive(Debug, Default)]
pub struct GitProducer {
    cwd: Option<PathBuf>,
}

impl GitProducer {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_branch(&self, out: &mut Emitter<Event>) {
        let branch = self.cwd.as_deref().and_then(read_branch);
        tracing::debug!("git branch in {:?}: {:?}", self.cwd, branch);
        let update = match branch {
            Some(branch) => SegmentUpdate::new(SEGMENT_ID)
                .text(branch)
                .icon("⎇")
                .color("muted"),
            None => SegmentUpdate::clear(SEGMENT_ID),
        };
        out.emit(Event::Update(update));
    }
}

impl Producer for GitProducer {
    fn id(&self) -> &str {
        "git"
    }

    fn registrations(&self) -> Vec<SegmentRegistration> {
        vec![SegmentRegistration::new(SEGMENT_ID, "Git Branch")]
    }

    fn subscriptions(&self) -> &'static [&'static str] {
        &[event::SESSION_START, event::SESSION_SWITCH, event::TOOL_RESULT]
    }

    fn handle(&mut self, event: &Event, out: &mut Emitter<Event>) {
        match event {
            Event::SessionStart(ctx) | Event::SessionSwitch(ctx) => {
                self.cwd = ctx.cwd.clone().or_else(|| std::env::current_dir().ok());
                self.emit_branch(out);
            }
            Event::ToolResult(result) if result.tool_name == "bash" => {
                if let Some(cwd) = &result.cwd {
                    self.cwd = Some(cwd.clone());
                }
                self.emit_branch(out);
            }
            _ => {}
        }
    }
}

/// Branch name of the repository at `cwd`, or the first eight characters of
/// the commit hash for a detached `HEAD`.  `None` outside a repository.
pub fn read_branch(cwd: &Path) -> Option<String> {
    let head = std::fs::read_to_string(git_dir(cwd)?.join("HEAD")).ok()?;
    let head = head.trim();

    let branch = match head.strip_prefix(BRANCH_PREFIX) {
        Some(branch) => branch.to_string(),
        None => head.chars().take(8).collect(),
    };
    (!branch.is_empty()).then_some(branch)
}

/// Locate the git directory: `.git` itself, or the target of a
/// `gitdir: <path>` file (worktrees, submodules).
fn git_dir(cwd: &Path) -> Option<PathBuf> {
    let dot_git = cwd.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    let pointer = std::fs::read_to_string(&dot_git).ok()?;
    let target = pointer.trim().strip_prefix("gitdir:")?.trim();
    Some(cwd.join(target))
}
