//! BBCode vote count formatting
//!
//! Reproduces the block moderators post in-thread: an `[area]` wrapper,
//! bold wagon lines with `[post=N]` links back to each vote, and the
//! countdown deadline.

use modtool_domain::{PostRef, VoteCount};

/// Formats vote counts as a thread-ready BBCode block.
pub struct BbcodeFormatter;

impl BbcodeFormatter {
    /// Render the block. `previous_count` adds the small
    /// "Previous Vote Count" link mods use to chain their counts.
    pub fn format(count: &VoteCount, previous_count: Option<u32>) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "[area=Official Vote Count {}-{}]\n",
            count.day, count.round
        ));

        for line in &count.lines {
            let Some(target) = &line.target else { continue };
            output.push_str(&format!(
                "[b]{}[/b] ({}): {}",
                target,
                line.voters.len(),
                Self::refs(&line.voters)
            ));
            if let Some(suffix) = line.status.suffix() {
                output.push_str(&format!(" [b][i]{}[/i][/b]", suffix));
            }
            output.push('\n');
        }

        if let Some(line) = count.lines.iter().find(|line| line.target.is_none()) {
            output.push_str(&format!(
                "\n[i]Not Voting[/i] ({}): {}\n",
                line.voters.len(),
                Self::refs(&line.voters)
            ));
        }

        output.push_str(&format!(
            "\nWith {} players alive, it takes {} to lynch.\n",
            count.player_count, count.majority
        ));

        if let Some(deadline) = &count.deadline {
            output.push_str(&format!(
                "\n[b]Deadline[/b]: [countdown]{}[/countdown]\n",
                deadline
            ));
        }
        if let Some(post) = previous_count {
            output.push_str(&format!(
                "[size=75][post={}]Previous Vote Count[/post][/size]\n",
                post
            ));
        }
        output.push_str("[/area]");
        output
    }

    fn refs(voters: &[(PostRef, String)]) -> String {
        voters
            .iter()
            .map(|(post, voter)| Self::vote_ref(*post, voter))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Link a voter to the post that cast the vote. Votes carried over
    /// from a seeded count have no post to link, so the bare name stands.
    fn vote_ref(post: PostRef, voter: &str) -> String {
        match post.post_number() {
            Some(number) => format!("[post={}]{}[/post]", number, voter),
            None => voter.to_string(),
        }
    }
}
