use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  AdminLogin,
  AdminLogout,
  Approve,
  CancelPrompt,
  CloseComments,
  Delete,
  DownloadBackup,
  EditComment,
  EditPost,
  HideHelp,
  InitBackend,
  LookupPostState,
  LookupReportState,
  NewComment,
  NewPost,
  None,
  OpenComments,
  OpenPicture,
  PageDown,
  PageUp,
  PickerCancel,
  PickerConfirm,
  Quit,
  Reaudit,
  Refresh,
  Reject,
  ReplyComment,
  ReportPost,
  RestoreBackup,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  SubmitPrompt,
  SwitchTabLeft,
  SwitchTabRight,
  ToggleAudit,
  UploadImage,
  Vote(Vote),
}
