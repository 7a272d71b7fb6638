/// File name a download is saved under: the part after the last `/` (or `\`)
/// of the server-supplied path.
pub fn file_name_from_path(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}
