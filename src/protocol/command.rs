#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    FilesAdd,
    FilesRemove,
    FilesList,
    FilesSetLocale,
    FilesSaveAll,
    KeysList,
    KeysGroups,
    KeysAdd,
    KeysRemove,
    KeysSync,
    KeysSelect,
    TranslationWrite,
    PlaceholderWrite,
    SettingsSet,
    ProjectNew,
    ProjectOpen,
    ProjectSave,
    GenL10nRun,
    QaRun,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "files.add" => Command::FilesAdd,
            "files.remove" => Command::FilesRemove,
            "files.list" => Command::FilesList,
            "files.set_locale" => Command::FilesSetLocale,
            "files.save_all" => Command::FilesSaveAll,
            "keys.list" => Command::KeysList,
            "keys.groups" => Command::KeysGroups,
            "keys.add" => Command::KeysAdd,
            "keys.remove" => Command::KeysRemove,
            "keys.sync" => Command::KeysSync,
            "keys.select" => Command::KeysSelect,
            "translation.write" => Command::TranslationWrite,
            "placeholder.write" => Command::PlaceholderWrite,
            "settings.set" => Command::SettingsSet,
            "project.new" => Command::ProjectNew,
            "project.open" => Command::ProjectOpen,
            "project.save" => Command::ProjectSave,
            "gen_l10n.run" => Command::GenL10nRun,
            "qa.run" => Command::QaRun,
            _ => Command::Unknown,
        }
    }
}
