//! Common source code fixtures for tests.

pub const PLUGIN: &str = r#"#include <sourcemod>
#include "helpers"

#pragma semicolon 1

public Plugin myinfo = {
    name = "Test",
};

int g_iCount = 0;
float g_fSpeed[MAXPLAYERS + 1];
char g_sName[64];

public void OnPluginStart()
{
    RegConsoleCmd("sm_test", Command_Test);
    int local = 5;
}

public Action Command_Test(int client, int args)
{
    if (client == 0) {
        return Plugin_Handled;
    }
    return Plugin_Continue;
}

stock bool IsValidClient(int client, bool allowBots = false)
{
    return client > 0 && client <= MaxClients;
}

native int Native_Get(Handle plugin, int numParams);
"#;

pub const LEGACY_PLUGIN: &str = r#"#include <sourcemod>

new Handle:g_hTimer = INVALID_HANDLE;
new Float:g_fDelay = 2.5, g_iTicks;

public OnPluginStart()
{
    g_hTimer = CreateTimer(g_fDelay, Timer_Tick, _, TIMER_REPEAT);
}

public Action:Timer_Tick(Handle:timer)
{
    g_iTicks++;
    return Plugin_Continue;
}

Float:Scale(Float:value, factor = 2)
{
    return value * float(factor);
}
"#;

pub const SOURCEMOD_INC: &str = r#"#if defined _sourcemod_included
 #endinput
#endif
#define _sourcemod_included

#include <core>

native int GetMaxClients();
native bool IsClientInGame(int client);
forward void OnPluginStart();
"#;

pub const CORE_INC: &str = "int MaxClients;\n";

pub const HELPERS_INC: &str = r#"#include "helpers"

stock void PrintToAll(const char[] message, any ...)
{
}
"#;
