//! phpBB post extraction
//!
//! Reduces a rendered thread page to the pieces the scan works on: post
//! numbers, authors, body lines, tagged vote actions, and any posted
//! vote count. Quoted text is dropped here so a vote inside a
//! blockquote never counts.

use modtool_application::{ForumPost, Page, PostLine, VoteAction};
use scraper::{ElementRef, Html, Node, Selector};

/// Legend prefix that marks a posted vote count.
pub const COUNT_LEGEND: &str = "Official Vote Count";

/// Extract every post on a thread page.
///
/// Posts the page renders without a number, author, or content block are
/// skipped rather than failing the page; phpBB themes pad threads with
/// ad and announcement blocks that reuse the `post` class.
pub fn parse_page(html: &str) -> Page {
    let document = Html::parse_document(html);

    let post_sel = Selector::parse("div.post").unwrap();
    let number_sel = Selector::parse("p.author a strong").unwrap();
    let author_sel = Selector::parse("dl.postprofile dt a").unwrap();
    let content_sel = Selector::parse("div.content").unwrap();

    let mut page = Page {
        posts: Vec::new(),
        total_posts: pagination_total(&document),
    };

    for post_el in document.select(&post_sel) {
        let Some(number) = post_el.select(&number_sel).next().and_then(|el| {
            collect_text(el)
                .trim()
                .trim_start_matches('#')
                .parse::<u32>()
                .ok()
        }) else {
            continue;
        };
        let Some(author) = post_el
            .select(&author_sel)
            .next()
            .map(|el| collect_text(el).trim().to_string())
        else {
            continue;
        };
        let Some(content) = post_el.select(&content_sel).next() else {
            continue;
        };

        let mut walker = LineWalker::default();
        walker.walk(content);
        walker.flush();

        page.posts.push(ForumPost {
            number,
            author,
            lines: walker.lines,
            tally_block: walker.tally,
        });
    }

    page
}

/// Total post count from the pagination strip (`"350 posts • Page 1 of 2"`).
fn pagination_total(document: &Html) -> Option<u32> {
    let sel = Selector::parse(".pagination").unwrap();
    let text: String = document.select(&sel).next()?.text().collect();
    text.split_whitespace()
        .next()?
        .trim_start_matches('"')
        .parse()
        .ok()
}

/// Splits a post body into lines on `<br>`, the way the board's own
/// renderer breaks paragraphs.
///
/// While walking:
/// - `blockquote` subtrees are skipped entirely (quoted votes and quoted
///   vote counts must not register)
/// - a `span.bbvote` contributes its text to the current line and tags
///   the line with the action it carries
/// - the first `fieldset` whose legend starts with [`COUNT_LEGEND`] is
///   lifted out of the line stream into `tally`
/// - `legend` text is header furniture, never body text
#[derive(Default)]
struct LineWalker {
    lines: Vec<PostLine>,
    current: String,
    action: Option<VoteAction>,
    tally: Option<Vec<String>>,
}

impl LineWalker {
    fn walk(&mut self, element: ElementRef) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.current.push_str(text),
                Node::Element(el) => {
                    let name = el.name();
                    if name == "br" {
                        self.flush();
                        continue;
                    }
                    if name == "blockquote" || name == "legend" {
                        continue;
                    }
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if name == "fieldset" && self.tally.is_none() {
                        if let Some(block) = tally_lines(child_el) {
                            self.tally = Some(block);
                            continue;
                        }
                    }
                    if el.classes().any(|class| class == "bbvote") {
                        let raw: String = child_el.text().collect();
                        if self.action.is_none() {
                            self.action = parse_vote_tag(&raw);
                        }
                        self.current.push_str(&raw);
                        continue;
                    }
                    self.walk(child_el);
                }
                _ => {}
            }
        }
    }

    fn flush(&mut self) {
        let text = self.current.trim().to_string();
        let action = self.action.take();
        self.current.clear();
        if !text.is_empty() {
            self.lines.push(PostLine { text, action });
        }
    }
}

/// Capture a posted vote count fieldset as plain lines, legend first.
///
/// Returns `None` when the legend is missing or is not a vote count; the
/// fieldset then reads as ordinary body text.
fn tally_lines(fieldset: ElementRef) -> Option<Vec<String>> {
    let legend_sel = Selector::parse("legend").unwrap();
    let legend = fieldset.select(&legend_sel).next()?;
    let header = collect_text(legend).trim().to_string();
    if !header.starts_with(COUNT_LEGEND) {
        return None;
    }

    let mut walker = LineWalker {
        // Already inside a captured block; a nested fieldset is body text.
        tally: Some(Vec::new()),
        ..Default::default()
    };
    walker.walk(fieldset);
    walker.flush();

    let mut block = vec![header];
    block.extend(walker.lines.into_iter().map(|line| line.text));
    Some(block)
}

/// Read a `span.bbvote` tag (`"VOTE: name"` / `"UNVOTE: name"`).
///
/// A tagged `"VOTE: unvote"` is an unvote, and a bare `"UNVOTE"` with no
/// target counts too.
fn parse_vote_tag(raw: &str) -> Option<VoteAction> {
    match raw.split_once(':') {
        Some((kind, target)) => match kind.trim() {
            "VOTE" if !target.trim().eq_ignore_ascii_case("unvote") => {
                Some(VoteAction::Vote(target.trim().to_string()))
            }
            "VOTE" | "UNVOTE" => Some(VoteAction::Unvote),
            _ => None,
        },
        None if raw.trim() == "UNVOTE" => Some(VoteAction::Unvote),
        None => None,
    }
}

fn collect_text(element: ElementRef) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
    <html><body>
      <div class="pagination">"350 posts" <span>Page 1 of 2</span></div>
      <div class="post">
        <dl class="postprofile"><dt><a href="./member?u=9">Beefster</a></dt></dl>
        <div class="postbody">
          <p class="author"><a href="#p12"><strong>#12</strong></a> by Beefster</p>
          <div class="content">
            hey @mod, is this open?<br />
            <blockquote><div>
              earlier someone wrote <span class="bbvote">VOTE: Bob</span>
            </div></blockquote>
            that quoted vote is not mine<br />
            <span class="bbvote">VOTE: Papa Zito</span><br />
            he has been <b>scummy</b> all day
          </div>
        </div>
      </div>
      <div class="post">
        <dl class="postprofile"><dt><a href="./member?u=1">ModGuy</a></dt></dl>
        <div class="postbody">
          <p class="author"><a href="#p13"><strong>#13</strong></a> by ModGuy</p>
          <div class="content">
            votes so far:<br />
            <fieldset>
              <legend>Official Vote Count 1-2</legend>
              Papa Zito (2): Beefster, Alice (L-1)<br />
              Not Voting (1): Dave<br />
              Deadline: 2026-09-01 18:00
            </fieldset>
            get voting, everyone
          </div>
        </div>
      </div>
    </body></html>
    "##;

    #[test]
    fn test_parse_page_extracts_posts_and_total() {
        let page = parse_page(PAGE);
        assert_eq!(page.total_posts, Some(350));
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].number, 12);
        assert_eq!(page.posts[0].author, "Beefster");
        assert_eq!(page.posts[1].number, 13);
        assert_eq!(page.posts[1].author, "ModGuy");
    }

    #[test]
    fn test_quoted_votes_are_dropped() {
        let page = parse_page(PAGE);
        let post = &page.posts[0];
        assert_eq!(post.lines[0], PostLine::plain("hey @mod, is this open?"));
        assert_eq!(
            post.lines[1],
            PostLine::plain("that quoted vote is not mine")
        );
        // Only the unquoted vote carries an action.
        let actions: Vec<_> = post
            .lines
            .iter()
            .filter_map(|line| line.action.clone())
            .collect();
        assert_eq!(actions, vec![VoteAction::Vote("Papa Zito".to_string())]);
    }

    #[test]
    fn test_tagged_vote_keeps_its_line_text() {
        let page = parse_page(PAGE);
        let vote_line = &page.posts[0].lines[2];
        assert_eq!(vote_line.text, "VOTE: Papa Zito");
        assert_eq!(
            vote_line.action,
            Some(VoteAction::Vote("Papa Zito".to_string()))
        );
        // Text after the final <br /> still flushes.
        assert_eq!(
            page.posts[0].lines[3].text,
            "he has been scummy all day"
        );
    }

    #[test]
    fn test_vote_count_fieldset_becomes_tally_block() {
        let page = parse_page(PAGE);
        let post = &page.posts[1];
        let block = post.tally_block.as_ref().unwrap();
        assert_eq!(
            block,
            &vec![
                "Official Vote Count 1-2".to_string(),
                "Papa Zito (2): Beefster, Alice (L-1)".to_string(),
                "Not Voting (1): Dave".to_string(),
                "Deadline: 2026-09-01 18:00".to_string(),
            ]
        );
        // The block stays out of the scanned lines.
        let texts: Vec<_> = post.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["votes so far:", "get voting, everyone"]);
    }

    #[test]
    fn test_posts_without_author_or_number_are_skipped() {
        let html = r#"
        <div class="post">
          <div class="content">an announcement block<br /></div>
        </div>
        "#;
        let page = parse_page(html);
        assert!(page.posts.is_empty());
        assert_eq!(page.total_posts, None);
    }

    #[test]
    fn test_parse_vote_tag_shapes() {
        assert_eq!(
            parse_vote_tag("VOTE: Bob"),
            Some(VoteAction::Vote("Bob".to_string()))
        );
        assert_eq!(parse_vote_tag("UNVOTE: Bob"), Some(VoteAction::Unvote));
        assert_eq!(parse_vote_tag("VOTE: unvote"), Some(VoteAction::Unvote));
        assert_eq!(parse_vote_tag("UNVOTE"), Some(VoteAction::Unvote));
        assert_eq!(parse_vote_tag("just some bold text"), None);
    }
}
