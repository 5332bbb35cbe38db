//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowLeft as ArrowLeft, LuChevronDown as ChevronDown, LuChevronLeft as ChevronLeft,
        LuChevronRight as ChevronRight, LuDownload as Download, LuEye as Eye,
        LuEyeOff as EyeOff, LuFileText as FileText, LuFolder as Folder,
        LuFolderOpen as FolderOpen, LuLock as Lock, LuMenu as Menu, LuPlus as Plus,
        LuShuffle as Shuffle, LuTrash2 as Trash, LuUndo2 as Return, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowLeft as ArrowLeft, BsArrowReturnLeft as Return, BsChevronDown as ChevronDown,
        BsChevronLeft as ChevronLeft, BsChevronRight as ChevronRight, BsDownload as Download,
        BsEye as Eye, BsEyeSlash as EyeOff, BsFileEarmarkText as FileText,
        BsFolder2Open as FolderOpen, BsFolderFill as Folder, BsList as Menu,
        BsLockFill as Lock, BsPlusLg as Plus, BsShuffle as Shuffle, BsTrash as Trash,
        BsUpload as Upload, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(ARROW_LEFT, ArrowLeft);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CLOSE, Close);
themed_icon!(DOWNLOAD, Download);
themed_icon!(EYE, Eye);
themed_icon!(EYE_OFF, EyeOff);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(LOCK, Lock);
themed_icon!(MENU, Menu);
themed_icon!(PLUS, Plus);
themed_icon!(RETURN, Return);
themed_icon!(SHUFFLE, Shuffle);
themed_icon!(TRASH, Trash);
themed_icon!(UPLOAD, Upload);
