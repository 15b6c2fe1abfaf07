//! Plain-text site summary (`llms.txt`).
//!
//! A machine-readable overview of the site: metadata, about text, projects,
//! and the full post list with absolute links.

use arbor_core::SiteConfig;

use crate::aggregate::ContentIndex;

/// Generate the `llms.txt` summary.
pub fn generate(config: &SiteConfig, index: &ContentIndex) -> String {
    let site = &config.site;
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", site.title));
    if !site.description.is_empty() {
        out.push_str(&format!("> {}\n\n", site.description));
    }
    if !site.slogan.is_empty() {
        out.push_str(&format!("{}\n\n", site.slogan));
    }

    if !site.about.paragraphs.is_empty() {
        out.push_str("## About\n\n");
        for paragraph in &site.about.paragraphs {
            out.push_str(&format!("{paragraph}\n"));
        }
        out.push('\n');
    }

    if !config.projects.is_empty() {
        out.push_str("## Projects\n\n");
        for project in &config.projects {
            if project.link.is_empty() {
                out.push_str(&format!("- {}: {}\n", project.title, project.description));
            } else {
                out.push_str(&format!(
                    "- [{}]({}): {}\n",
                    project.title, project.link, project.description
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("## Blog\n\n");
    for post in index.posts() {
        out.push_str(&format!(
            "- [{}]({})\n",
            post.title,
            config.url_for(&format!("blog/{}.html", post.slug))
        ));
    }

    out
}
