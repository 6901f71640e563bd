//! Page Markup
//!
//! Builds the host page the lists discover: a header, one section per list
//! and the tooltip template.
//!
//! ```text
//! body
//!   header#main-header > h1
//!   section#active-projects > header > h2, ul > li#<id>.card*
//!   section#finished-projects > header > h2, ul > li#<id>.card*
//! template "tooltip" > h2, p
//! ```

use crate::config::{BoardConfig, ProjectSeed};
use crate::error::BoardResult;
use crate::project_list::ListType;
use crate::tooltip::TOOLTIP_TEMPLATE;
use crate::tree::{NodeKey, UiTree};

pub fn render(tree: &mut UiTree, config: &BoardConfig) -> BoardResult<()> {
    let body = tree.body();

    let header = tree.create_element("header");
    tree.set_id(header, "main-header")?;
    let title = text_element(tree, "h1", &config.title)?;
    tree.append_child(header, title)?;
    tree.append_child(body, header)?;

    for list in ListType::ALL {
        let section = render_section(tree, list, config.projects_in(list))?;
        tree.append_child(body, section)?;
    }

    render_tooltip_template(tree)
}

fn text_element(tree: &mut UiTree, tag: &str, text: &str) -> BoardResult<NodeKey> {
    let element = tree.create_element(tag);
    tree.set_text(element, text)?;
    Ok(element)
}

fn render_section<'a>(
    tree: &mut UiTree,
    list: ListType,
    projects: impl Iterator<Item = &'a ProjectSeed>,
) -> BoardResult<NodeKey> {
    let section = tree.create_element("section");
    tree.set_id(section, &list.container_id())?;

    let header = tree.create_element("header");
    let heading = text_element(tree, "h2", list.heading())?;
    tree.append_child(header, heading)?;
    tree.append_child(section, header)?;

    let ul = tree.create_element("ul");
    for project in projects {
        let li = render_project(tree, project, list)?;
        tree.append_child(ul, li)?;
    }
    tree.append_child(section, ul)?;
    Ok(section)
}

fn render_project(
    tree: &mut UiTree,
    project: &ProjectSeed,
    list: ListType,
) -> BoardResult<NodeKey> {
    let li = tree.create_element("li");
    tree.set_id(li, &project.id)?;
    tree.add_class(li, "card")?;
    if let Some(info) = &project.extra_info {
        tree.set_data(li, "extra-info", info)?;
    }

    let title = text_element(tree, "h2", &project.title)?;
    let description = text_element(tree, "p", &project.description)?;
    let more_info = text_element(tree, "button", "More Info")?;
    tree.add_class(more_info, "alt")?;
    let switch = text_element(tree, "button", list.switch_label())?;

    for child in [title, description, more_info, switch] {
        tree.append_child(li, child)?;
    }
    Ok(li)
}

fn render_tooltip_template(tree: &mut UiTree) -> BoardResult<()> {
    let template = tree.create_template(TOOLTIP_TEMPLATE)?;
    let heading = text_element(tree, "h2", "More Info")?;
    let paragraph = tree.create_element("p");
    tree.append_child(template, heading)?;
    tree.append_child(template, paragraph)?;
    Ok(())
}
