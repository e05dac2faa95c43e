//! Prompt Document Rendering
//!
//! `coding_prompts/llm_prompt.md` is a structured document interpolating
//! every field of the project configuration into a fixed template, plus a
//! static list of process constraints for the downstream coding agent.
//! Always overwritten.
//!
//! Style paths that name a readable local file are embedded as base64
//! wrapped in `<< >>`; anything else (URLs, missing paths) is carried
//! verbatim.

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use crate::types::ProjectConfig;

/// Fixed walkthroughs of the FileMaker-side scripts the widget talks to,
/// carried into every prompt document so the downstream agent knows what
/// already exists in the solution. Kept as plain text outside the format
/// string because the JSON samples contain braces.
const SCRIPT_EXAMPLES: &str = r###"### Plain text example of the filemaker script JS * Fetch Data
```
# Purpose:   Backend filemaker service execution
# Context:   universal
# Uses:      FMGofer

Set Error Capture [ On ]

If [ IsEmpty ( Get ( ScriptParameter ) ) ]
    # — EXAMPLES
          # — UPDATE PARAMS (for testing in absence of ScriptParameter)
            {"action": "update",
              "version": "vLatest",
              "layout": "devTasks",
              "recordId": "9",
              "fieldData": {"f_completed": 1
                ...
              }
            }

          # — READ PARAMS (example)
            {"action": "read",
              "version": "vLatest",
              "layout": "devTasks",
              "query": [
                {"f_active": 1}
              ]
            }

          # — CREATE PARAMS
            {"action": "create",
              "version": "vLatest",
              "layouts": "devTasks",
              "fieldData": [
                {"f_completed": 1},
                {"task": "pick up pills"}
                ...
              ]
            }
          # — DELETE PARAMS
            {"action": "delete",
              "version": "vLatest",
              "layouts": "devTasks",
              "recordId": "9"
            }
          # — RETURN CONTEXT PARAMS
            {"action": "returnContext"
            }
Else

  Set Variable [ $payload ; Value: JSONGetElement ( Get ( ScriptParameter ) ; "parameter" ) ]

  If [ IsEmpty ( $payload ) ]
    # Proxy through FileMaker.PerformScript (FMGofer) when no payload
    Set Variable [ $payload ; Value: Get ( ScriptParameter ) ]
    Perform Script on Server with Callback [
      Specified: From list:     “JS * performSearch” ;
      Parameter:                $payload ;
      Callback script specified: From list: “JS * returnResult” ;
      Parameter:                Get ( ScriptResult ) ;
      State:                    Continue
    ]
    Exit Script [ Text Result:
      JSONSetElement (
        "" ;
        ["messages[0].message" ; "fetch sent for processing" ; JSONString] ;
        ["messages[0].code"    ; 0                     ; JSONNumber]
      )
    ]
  End If

End If


# — Grab callback info from FMGofer payload
Set Variable [ $callbackName ; Value: JSONGetElement ( Get ( ScriptParameter ) ; "callbackName" ) ]
Set Variable [ $promiseID    ; Value: JSONGetElement ( Get ( ScriptParameter ) ; "promiseID"    ) ]

# — Find the Web Viewer object on the current layout
Set Variable [ $webViewer ; Value:
  While (
    [ input     = LayoutObjectNames ( Get ( FileName ) ; Get ( LayoutName ) ) ;
      N         = ValueCount ( input ) ;
      theResult = "" ;
      X         = 1
    ] ;
    X ≤ N ;
    [
      thisResult = GetValue ( input ; X ) ;
      test       = PatternCount ( thisResult ; "WV" ) ;
      theResult  = If ( test ; List ( theResult ; thisResult ) ; theResult ) ;
      X          = X + 1
    ] ;
    theResult
  )
]


# — Validate that an “action” was passed
If [ IsEmpty ( JSONGetElement ( $payload ; "action" ) ) ]
  Set Variable [ $error ; Value: "action is required." ]
  Perform JavaScript in Web Viewer [
    Object Name:   $webViewer ;
    Function Name: $callbackName ;
    Parameters:    $promiseID ; $responseJSON ; $error
  ]
  Exit Script [ Text Result: "" ]
End If


# — Branch by action type
Set Variable [ $action ; Value: JSONGetElement ( $payload ; "action" ) ]
Set Variable [ $layout ; Value: JSONGetElement ( $payload ; "layout" ) ]

If [ $action = "read" ]

  Set Variable [ $query ; Value: JSONGetElement ( $payload ; "query" ) ]
  Set Variable [ $data  ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ] //read, metaData, create, update, delete, and duplicate
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "query" ; $query ; JSONArray ]
        ;[ "dateformats" ; 1 ; JSONString ]
        ;[ "limit" ; 1000 ; JSONString ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "update" ]

  Set Variable [ $recordId  ; Value: JSONGetElement ( $payload ; "recordId"  ) ]
  Set Variable [ $fieldData ; Value: JSONGetElement ( $payload ; "fieldData" ) ]
  Set Variable [ $data      ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "recordId" ;$recordId; JSONString ]
        ;[ "fieldData" ; $fieldData ; JSONObject ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "create" ]

  Set Variable [ $fieldData ; Value: JSONGetElement ( $payload ; "fieldData" ) ]
  Set Variable [ $data      ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "fieldData" ; $fieldData ; JSONObject ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "delete" ]

  Set Variable [ $recordId ; Value: JSONGetElement ( $payload ; "recordId" ) ]
  Set Variable [ $data     ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "recordId" ; $recordId ; JSONString ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "returnContext" ]

  Set Variable [ $data         ; Value:
    GetTableDDL (
      JSONMakeArray (
        TableNames ( Get ( FileName ) ) ; "" ; JSONString ; ""
      )
    )
  ]
  Set Variable [ $responseJSON ; Value:
    JSONSetElement (
      "" ;
      ["userName" ; Get ( UserName ) ; JSONString] ;
      ["dbModel"  ; $data           ; JSONString]
    )
  ]

End If


# — Error handling
Set Variable [ $errorNum ; Value: Get ( LastError ) ]
If [ $errorNum ≠ 0 and $errorNum ≠ 401 ]
  Set Variable [ $error ; Value: ErrorText ( $errorNum ) ]
End If


# — Return result to the Web Viewer callback
Perform JavaScript in Web Viewer [
  Object Name:   $webViewer ;
  Function Name: $callbackName ;
  Parameters:    $promiseID ; $responseJSON ; $error
]
```

### Plain text example of the filemaker script JS * performSearch
```
# Purpose:   sync process to manage FileMaker backend calls
# Context:   universal

Set Error Capture [ On ]

If [ IsEmpty ( Get ( ScriptParameter ) ) ]
    # — EXAMPLES (same parameter shapes as JS * Fetch Data)
Else

  Set Variable [ $payload ; Value: Get ( ScriptParameter ) ]

End If


# — Locate the Web Viewer on the current layout
Set Variable [ $webViewer ; Value:
  While (
    [ input     = LayoutObjectNames ( Get ( FileName ) ; Get ( LayoutName ) ) ;
      N         = ValueCount ( input ) ;
      theResult = "" ;
      X         = 1
    ] ;
    X ≤ N ;
    [
      thisResult = GetValue ( input ; X ) ;
      theResult  = If ( PatternCount ( thisResult ; "WV" ) ; List ( theResult ; thisResult ) ; theResult ) ;
      X = X + 1
    ] ;
    theResult
  )
]


# — Dispatch by action
Set Variable [ $action ; Value: JSONGetElement ( $payload ; "action" ) ]
Set Variable [ $layout ; Value: JSONGetElement ( $payload ; "layout" ) ]

If [ $action = "read" ]

  Set Variable [ $query ; Value: JSONGetElement ( $payload ; "query" ) ]
  Set Variable [ $data  ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "query" ; $query ; JSONArray ]
        ;[ "dateformats" ; 1 ; JSONString ]
        ;[ "limit" ; 1000 ; JSONString ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "update" ]

  Set Variable [ $recordId  ; Value: JSONGetElement ( $payload ; "recordId"  ) ]
  Set Variable [ $fieldData ; Value: JSONGetElement ( $payload ; "fieldData" ) ]
  Set Variable [ $data      ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "recordId" ;$recordId; JSONString ]
        ;[ "fieldData" ; $fieldData ; JSONObject ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "create" ]

  Set Variable [ $fieldData ; Value: JSONGetElement ( $payload ; "fieldData" ) ]
  Set Variable [ $data      ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "fieldData" ; $fieldData ; JSONObject ]
    )
  ]
  Execute FileMaker Data API [ Select ; Target: $responseJSON ; $data ]

Else If [ $action = "returnContext" ]

  # Gather context info via ExecuteSQL
  Set Variable [ $userID    ; Value: /* ExecuteSQL("SELECT ...") */ ]
  Set Variable [ $teamIDs   ; Value: /* JSONMakeArray( ExecuteSQL("SELECT ...") ) */ ]
  Set Variable [ $responseJSON ; Value:
    JSONSetElement ( ""
        ;[ "action" ;JSONGetElement($payload;"action"); JSONString ]
        ;[ "version" ;"vLatest"; JSONString ]
        ;[ "layouts" ;$layout; JSONString ]
        ;[ "recordId" ; $recordId ; JSONString ]
    )
  ]

End If


# — Return combined payload + response
Exit Script [ Text Result:
  JSONSetElement (
    $payload ;
    ["responseJSON" ; $responseJSON ; JSONObject]
  )
]
```

### Plain text example of the filemaker script JS * returnResult
```
# Purpose:   filemaker sync process callback
# Context:   universal

Set Error Capture [ On ]

If [ IsEmpty ( Get ( ScriptParameter ) ) ]
    Set Variable [ $payload ; Value: JSONGetElement ( Get ( ScriptResult ) ; "" ) ]
Else
    Set Variable [ $payload ; Value: JSONGetElement ( Get ( ScriptParameter ) ; "" ) ]
End If

Set Variable [ $callBackName     ; Value: JSONGetElement ( Get ( ScriptResult ) ; "callbackName" ) ]
Set Variable [ $callBackID       ; Value: JSONGetElement ( $payload ; "callbackID" ) ]
Set Variable [ $callBackFunction ; Value: JSONGetElement ( $payload ; "callbackFunction" ) ]
Set Variable [ $responseJSON     ; Value: JSONGetElement ( Get ( ScriptResult ) ; "responseJSON" ) ]

Set Variable [ $data ; Value:
  JSONSetElement (
    "" ;
    ["callbackId"       ; $callBackID       ; JSONString] ;
    ["callbackFunction" ; $callBackFunction ; JSONString] ;
    ["response"         ; JSONGetElement ( $responseJSON ; "response" ) ; JSONObject]
  )
]

Set Variable [ $webViewer ; Value:
  While (
    [ input     = LayoutObjectNames ( Get ( FileName ) ; Get ( LayoutName ) ) ;
      N         = ValueCount ( input ) ;
      theResult = "" ;
      X         = 1
    ] ;
    X ≤ N ;
    [
      thisResult = GetValue ( input ; X ) ;
      test       = PatternCount ( thisResult ; "WV" ) ;
      theResult  = If ( test ; List ( theResult ; thisResult ) ; theResult ) ;
      X          = X + 1
    ] ;
    theResult
  )
]

Perform JavaScript in Web Viewer [
  Object Name:   $webViewer ;
  Function Name: $callBackName ;
  Parameters:    $data
]
```

### Plain text example of the filemaker script UploadToHTML
```
Set Variable [ $params     ; Value: Get ( ScriptParameter ) ]
Set Variable [ $path       ; Value: JSONGetElement ( $params ; "thePath" ) ]
Set Variable [ $widgetName ; Value: JSONGetElement ( $params ; "widgetName" ) ]

If [ IsEmpty ( $path ) ]
  Exit Script [ Text Result: "" ]
End If

If [ Get ( SystemPlatform ) = -2 ]
  Set Variable [ $Format ; Value: WinPath ]
Else
  Set Variable [ $Format ; Value: PosixPath ]
End If

Set Variable [ $path ; Value: ConvertToFileMakerPath ( $path ; $Format ) ]

New Window [ Style: Document ; Using layout: “HTML” (HTML) ]

Enter Find Mode [ Pause: Off ]
Set Field [ HTML::Name ; "==" & $widgetName ]
Perform Find []

If [ Get ( FoundCount ) = 0 ]
  New Record/Request
  Set Field [ HTML::Name ; $widgetName ]
  Set Variable [ $message ; Value: $widgetName & " has been added." ]
Else
  Set Variable [ $message ; Value: $widgetName & " has been updated." ]
End If

Open Data File [ $path ; Target: $fileId ]
Read from Data File [ File ID: $fileId ; Target: HTML::HTML ; Read as: UTF-8 ]
Close Data File [ File ID: $fileId ]

Commit Records/Requests [ With dialog: On ]
Close Window [ Current Window ]

Show Custom Dialog [ “New version uploaded” ; $message ]
```

### Additional Information

Widgets do **not** typically include testing, but you may include it if you feel it
is necessary with permission. Setting up sample data so the widget can be tested in a
browser is appreciated. Simply trap for the absence of the FileMaker object to
utilize sample data.
"###;

/// Resolve each style path to its embedded form. Read failures fall back
/// to the verbatim path rather than aborting the run.
pub fn embed_style_paths(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            if Path::new(path).is_file() {
                match fs::read(path) {
                    Ok(bytes) => format!("<<{}>>", BASE64.encode(bytes)),
                    Err(e) => {
                        debug!("Could not read style file {path}: {e}");
                        path.clone()
                    }
                }
            } else {
                path.clone()
            }
        })
        .collect()
}

/// Render the prompt document. Pure given the already-embedded style
/// payloads: the same inputs always yield byte-identical output.
pub fn render_prompt_doc(config: &ProjectConfig, styles: &[String]) -> String {
    let styles_line = if styles.is_empty() {
        "(none)".to_string()
    } else {
        styles.join(" ")
    };

    format!(
        r#"# LLM Prompt

## CONTEXT
This is a widget project named '{project_name}' that the user described in the following: "{intention}".
The widget is intended to be used in a FileMaker webviewer. The widget is being
developed in a JavaScript environment with the following specifications:
- FileMaker file: {file}
- FileMaker server: {server}
- Styles/examples: {styles_line}
- Tech stack: {stacks}, TypeScript: {ts}, State management: {state}.

/src/services/FileMakerService.js is a service that provides a method to execute
FileMaker scripts either synchronously or asynchronously based on the method
parameter. This is the widget's primary means of communicating with FileMaker.

{script_examples}
## IMPORTANT
The repo uses common JS file extensions. If you are using React or Next.js you must
convert the files to .jsx or .tsx respectively. You must also update the package.json
file to include the necessary dependencies and scripts for React or Next.js.

## TASKS
1) Complete the set up by updating 'widget.config.cjs'
```javascript
module.exports = {{
  widgetName: "{project_name}" || "jsDev",
  server: "{server}" || "$",
  file: "{file}" || "jsDev",
  uploadScript: "{script}" || "UploadToHTML",
}}
```

2) Then consider the user's intended purpose for the widget. If any aspect of its
development remains unclear you should ask the user for clarification. Document the
steps and stages of development in the /docs/development_tasks.md file. This file
should include:
2.1. A description of the widget's intended purpose.
2.2. Libraries and frameworks to install including FMGofer.
2.3. Styles to implement referencing the url/path provided by the user and
     instructions to create CSS files based on those images/examples.
2.4. State management to implement (if any).
2.5. Services to create (if any).
2.6. Components to create.
2.7. Pages to create (if any).
2.8. Any other relevant information.

3) You should then ask the user to paste
'GetTableDDL ( JSONMakeArray ( TableNames ( Get(FileName) ) ; "" ; JSONString ) ; "" )'
into their data view and provide you with the result. This will be used to create the
widget's data model. The result should be placed in /docs/data_model.md. This data
model can then be used with the FileMakerService to get the data from FileMaker.

With the user's permission you may proceed to develop the widget's intended features
and functionality.

## CONSTRAINTS
Follow the directions provided in development_guidelines.md. If the file does not
exist then use the following:
1. You may use third-party libraries under the following conditions.
   - You must not use any third-party libraries or frameworks without user consent.
   - You must not use any third-party libraries or frameworks that are not compatible with FileMaker.
   - You must not use any third-party libraries or frameworks that are not compatible with the user's intended purpose for the widget.
   - You may not use libraries if one already exists that completes the same functionality.
2. You must not use any deprecated or obsolete JavaScript features.
3. You must not use any non-standard JavaScript features or APIs.
4. You must not use any non-standard HTML or CSS features or APIs.
   - CSS must remain grouped and organized in a single file.
   - CSS must be as DRY as possible.
   - CSS should comply with the example provided. If none is provided then implement a modern elegant consistent style.
5. You must not use any non-standard FileMaker features or APIs.
"#,
        project_name = config.project_name,
        intention = config.widget_intention,
        file = config.file_display(),
        server = config.server_path.display_form(),
        styles_line = styles_line,
        stacks = config.tech_stack_names(),
        ts = config.typescript_status(),
        state = config.state_library.display_form(),
        script = config.script_name,
        script_examples = SCRIPT_EXAMPLES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServerPath, StateLibrary, TechStack};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample() -> ProjectConfig {
        ProjectConfig {
            project_name: "Widgets".to_string(),
            server_path: ServerPath::UseDefault,
            file_name: "unknown".to_string(),
            script_name: "JS * fetch".to_string(),
            widget_intention: "A date range picker".to_string(),
            style_paths: vec![],
            project_dir: PathBuf::from("/tmp"),
            tech_stack: vec![TechStack::React, TechStack::CommonJs],
            use_typescript: false,
            state_library: StateLibrary::None,
        }
    }

    #[test]
    fn test_interpolates_every_field() {
        let doc = render_prompt_doc(&sample(), &[]);

        assert!(doc.contains("named 'Widgets'"));
        assert!(doc.contains("\"A date range picker\""));
        assert!(doc.contains("- FileMaker file: (default)"));
        assert!(doc.contains("- FileMaker server: (use repo default)"));
        assert!(doc.contains("- Styles/examples: (none)"));
        assert!(doc.contains("Tech stack: React, CommonJS"));
        assert!(doc.contains("TypeScript: disabled"));
        assert!(doc.contains("State management: none."));
        assert!(doc.contains("uploadScript: \"JS * fetch\""));
    }

    #[test]
    fn test_static_constraints_present() {
        let doc = render_prompt_doc(&sample(), &[]);
        assert!(doc.contains("without user consent"));
        assert!(doc.contains("deprecated or obsolete JavaScript features"));
        assert!(doc.contains("CSS must remain grouped and organized in a single file"));
    }

    #[test]
    fn test_script_examples_present() {
        let doc = render_prompt_doc(&sample(), &[]);
        assert!(doc.contains("### Plain text example of the filemaker script JS * Fetch Data"));
        assert!(doc.contains("### Plain text example of the filemaker script JS * performSearch"));
        assert!(doc.contains("### Plain text example of the filemaker script JS * returnResult"));
        assert!(doc.contains("### Plain text example of the filemaker script UploadToHTML"));
        assert!(doc.contains("Execute FileMaker Data API"));
        assert!(doc.contains("### Additional Information"));
        assert!(doc.contains("Widgets do **not** typically include testing"));
    }

    #[test]
    fn test_styles_joined_by_whitespace() {
        let styles = vec!["a.css".to_string(), "<<QUJD>>".to_string()];
        let doc = render_prompt_doc(&sample(), &styles);
        assert!(doc.contains("- Styles/examples: a.css <<QUJD>>"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let config = sample();
        let styles = vec!["a.css".to_string()];
        assert_eq!(
            render_prompt_doc(&config, &styles),
            render_prompt_doc(&config, &styles)
        );
    }

    #[test]
    fn test_typescript_and_state_flags() {
        let mut config = sample();
        config.use_typescript = true;
        config.state_library = StateLibrary::Named("Redux".to_string());
        let doc = render_prompt_doc(&config, &[]);
        assert!(doc.contains("TypeScript: enabled"));
        assert!(doc.contains("State management: Redux."));
    }

    #[test]
    fn test_embed_reads_local_files_as_base64() {
        let tmp = TempDir::new().unwrap();
        let css = tmp.path().join("example.css");
        fs::write(&css, "body {}").unwrap();

        let styles = embed_style_paths(&[
            css.to_string_lossy().into_owned(),
            "https://example.com/style.css".to_string(),
        ]);

        assert_eq!(styles.len(), 2);
        assert!(styles[0].starts_with("<<"));
        assert!(styles[0].ends_with(">>"));
        assert_eq!(styles[1], "https://example.com/style.css");
    }

    #[test]
    fn test_embed_keeps_missing_paths_verbatim() {
        let styles = embed_style_paths(&["does/not/exist.png".to_string()]);
        assert_eq!(styles, vec!["does/not/exist.png".to_string()]);
    }
}
