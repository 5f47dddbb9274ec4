pub const MOUNT_OVERLAY: &str = r#"
(styles, markup, overlayId, contentId) => {
    const content = document.getElementById(contentId);
    if (!content) return { contentFound: false, mounted: false };

    if (!document.getElementById(overlayId)) {
        const style = document.createElement('style');
        style.textContent = styles;
        document.head.appendChild(style);

        const holder = document.createElement('div');
        holder.innerHTML = markup;
        document.body.appendChild(holder.firstElementChild);
    }
    return { contentFound: true, mounted: true };
}
"#;

pub const SET_REGIONS: &str = r#"
(overlayId, overlayDisplay, contentId, contentDisplay) => {
    const overlay = document.getElementById(overlayId);
    const content = document.getElementById(contentId);
    if (overlay) overlay.style.display = overlayDisplay;
    if (content) content.style.display = contentDisplay;
    return { overlay: !!overlay, content: !!content };
}
"#;
