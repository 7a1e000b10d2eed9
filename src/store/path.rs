// Remote-path helpers shared by the store client

/// Directory path of a container under the operator root, with a trailing '/'.
pub fn container_dir(container: &str) -> String {
    let trimmed = container.trim_matches('/');
    format!("{trimmed}/")
}

/// Full remote path of an object inside a container.
pub fn object_path(container: &str, object: &str) -> String {
    format!("{}{}", container_dir(container), object.trim_start_matches('/'))
}

/// Container-relative object name for a full listing path.
pub fn object_name(full_path: &str, container: &str) -> String {
    let dir = container_dir(container);
    full_path
        .trim_start_matches('/')
        .strip_prefix(&dir)
        .unwrap_or(full_path)
        .to_string()
}
