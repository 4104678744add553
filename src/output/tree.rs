//! Directory tree preview built from relative file paths

use std::collections::BTreeMap;

/// Default number of directory levels below the root shown in a preview
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// One line of a tree preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Nesting level, 0 for entries directly under the root
    pub depth: usize,
    /// Entry name
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
    is_file: bool,
}

/// Build a preview of the tree containing `paths`.
///
/// Only directories leading to a listed file appear. Entries whose name
/// starts with `.` are hidden along with everything beneath them. Entries
/// deeper than `max_depth` are omitted. Siblings are sorted by name.
pub fn render_tree<S: AsRef<str>>(paths: &[S], max_depth: usize) -> Vec<TreeLine> {
    let mut root = Node::default();

    for path in paths {
        let parts: Vec<&str> = path.as_ref().split('/').filter(|p| !p.is_empty()).collect();
        if parts.iter().any(|p| p.starts_with('.')) {
            continue;
        }

        let Some((file, dirs)) = parts.split_last() else {
            continue;
        };
        let mut node = &mut root;
        for dir in dirs {
            node = node.children.entry((*dir).to_string()).or_default();
        }
        node.children.entry((*file).to_string()).or_default().is_file = true;
    }

    let mut lines = Vec::new();
    push_lines(&root, 0, max_depth, &mut lines);
    lines
}

fn push_lines(node: &Node, depth: usize, max_depth: usize, lines: &mut Vec<TreeLine>) {
    if depth > max_depth {
        return;
    }

    for (name, child) in &node.children {
        let is_dir = !child.is_file;
        lines.push(TreeLine {
            depth,
            name: name.clone(),
            is_dir,
        });
        if is_dir {
            push_lines(child, depth + 1, max_depth, lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(lines: &[TreeLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                let suffix = if l.is_dir { "/" } else { "" };
                format!("{}{}{}", "  ".repeat(l.depth), l.name, suffix)
            })
            .collect()
    }

    #[test]
    fn nests_directories_and_sorts() {
        let lines = render_tree(&["src/main.rs", "README.md", "src/cli/args.rs", "Cargo.toml"], 3);
        assert_eq!(
            show(&lines),
            vec![
                "Cargo.toml",
                "README.md",
                "src/",
                "  cli/",
                "    args.rs",
                "  main.rs",
            ]
        );
    }

    #[test]
    fn hides_dot_entries() {
        let lines = render_tree(&[".github/workflows/ci.yml", ".env", "a.go"], 3);
        assert_eq!(show(&lines), vec!["a.go"]);
    }

    #[test]
    fn limits_depth() {
        let lines = render_tree(&["a/b/c/d/e.txt"], 2);
        assert_eq!(show(&lines), vec!["a/", "  b/", "    c/"]);

        let lines = render_tree(&["a/b/c/d/e.txt"], 0);
        assert_eq!(show(&lines), vec!["a/"]);
    }

    #[test]
    fn empty_input() {
        assert!(render_tree::<&str>(&[], 3).is_empty());
    }
}
